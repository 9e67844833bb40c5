use super::resources::{InstanceData, DEPTH_FORMAT, SHADOW_FORMAT};
use super::shaders::{BOX_SHADER, SHADOW_SHADER};
use crate::mesh::Vertex;
use wgpu::*;

pub struct PipelineState {
    pub box_pipeline: RenderPipeline,
    pub shadow_pipeline: RenderPipeline,
    pub scene_layout: BindGroupLayout,
    pub shadow_layout: BindGroupLayout,
}

fn uniform_entry(binding: u32, visibility: ShaderStages) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

const VERTEX_ATTRIBUTES: [VertexAttribute; 2] = vertex_attr_array![0 => Float32x3, 1 => Float32x3];
// offset + receive, scale + cast, color
const INSTANCE_ATTRIBUTES: [VertexAttribute; 3] =
    vertex_attr_array![2 => Float32x4, 3 => Float32x4, 4 => Float32x4];

fn buffer_layouts() -> [VertexBufferLayout<'static>; 2] {
    [
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        },
        VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as u64,
            step_mode: VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRIBUTES,
        },
    ]
}

pub fn create_pipelines(device: &Device, format: TextureFormat) -> PipelineState {
    // 1. Scene bind group: camera, light, shadow map, comparison sampler
    let scene_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Scene Bind Group Layout"),
        entries: &[
            uniform_entry(0, ShaderStages::VERTEX),
            uniform_entry(1, ShaderStages::VERTEX | ShaderStages::FRAGMENT),
            BindGroupLayoutEntry {
                binding: 2,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Texture {
                    multisampled: false,
                    view_dimension: TextureViewDimension::D2,
                    sample_type: TextureSampleType::Depth,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 3,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Sampler(SamplerBindingType::Comparison),
                count: None,
            },
        ],
    });

    // 2. Shadow bind group: light only
    let shadow_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Shadow Bind Group Layout"),
        entries: &[uniform_entry(0, ShaderStages::VERTEX)],
    });

    // 3. Box pipeline
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("Box Shader"),
        source: ShaderSource::Wgsl(BOX_SHADER.into()),
    });

    let box_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Box Pipeline Layout"),
        bind_group_layouts: &[&scene_layout],
        push_constant_ranges: &[],
    });

    let box_pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("Box Pipeline"),
        layout: Some(&box_layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &buffer_layouts(),
            compilation_options: Default::default(),
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: Some(Face::Back),
            unclipped_depth: false,
            polygon_mode: PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    // 4. Shadow pipeline, depth only
    let shadow_shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("Shadow Shader"),
        source: ShaderSource::Wgsl(SHADOW_SHADER.into()),
    });

    let shadow_pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Shadow Pipeline Layout"),
        bind_group_layouts: &[&shadow_layout],
        push_constant_ranges: &[],
    });

    let shadow_pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("Shadow Pipeline"),
        layout: Some(&shadow_pipeline_layout),
        vertex: VertexState {
            module: &shadow_shader,
            entry_point: Some("vs_shadow"),
            buffers: &buffer_layouts(),
            compilation_options: Default::default(),
        },
        fragment: None,
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: Some(Face::Back),
            unclipped_depth: false,
            polygon_mode: PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: SHADOW_FORMAT,
            depth_write_enabled: true,
            depth_compare: CompareFunction::LessEqual,
            stencil: StencilState::default(),
            bias: DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        }),
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    PipelineState {
        box_pipeline,
        shadow_pipeline,
        scene_layout,
        shadow_layout,
    }
}
