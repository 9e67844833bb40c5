use crate::camera::{CameraUniform, LightUniform};
use sim_core::{Renderable, ShadowFilter, ShadowSettings};
use wgpu::util::DeviceExt;
use wgpu::*;

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;
pub const SHADOW_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// Instance data for rendering (matches shader InstanceInput).
/// Must use `repr(C)` and `bytemuck` to safely cast to raw bytes for the GPU buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub offset: [f32; 4], // x, y, z, receives shadow
    pub scale: [f32; 4],  // width, height, depth, casts shadow
    pub color: [f32; 4],  // rgba
}

impl InstanceData {
    pub fn new(renderable: &Renderable, position: glam::Vec3) -> Self {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        // Box colors are sRGB, the surface expects linear values
        let [r, g, b] = renderable.color.to_rgb().map(|c| c.powf(2.2));
        Self {
            offset: [
                position.x,
                position.y,
                position.z,
                flag(renderable.receive_shadow),
            ],
            scale: [
                renderable.size.x,
                renderable.size.y,
                renderable.size.z,
                flag(renderable.cast_shadow),
            ],
            color: [r, g, b, 1.0],
        }
    }
}

pub struct SceneBuffers {
    pub camera: Buffer,
    pub light: Buffer,
    pub instances: Buffer,
    pub max_instances: usize,
}

#[allow(dead_code)]
pub struct DepthTexture {
    pub texture: Texture,
    pub view: TextureView,
}

#[allow(dead_code)]
pub struct ShadowMap {
    pub texture: Texture,
    pub view: TextureView,
    pub sampler: Sampler,
}

pub fn create_buffers(
    device: &Device,
    camera: &CameraUniform,
    light: &LightUniform,
    max_instances: usize,
) -> SceneBuffers {
    let camera_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
        label: Some("Camera Buffer"),
        contents: bytemuck::cast_slice(&[*camera]),
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
    });

    let light_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
        label: Some("Light Buffer"),
        contents: bytemuck::cast_slice(&[*light]),
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
    });

    let instances = device.create_buffer(&BufferDescriptor {
        label: Some("Box Instance Buffer"),
        size: (std::mem::size_of::<InstanceData>() * max_instances.max(1)) as u64,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    SceneBuffers {
        camera: camera_buffer,
        light: light_buffer,
        instances,
        max_instances,
    }
}

pub fn create_depth_texture(device: &Device, config: &SurfaceConfiguration) -> DepthTexture {
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("Depth Texture"),
        size: Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&TextureViewDescriptor::default());

    DepthTexture { texture, view }
}

pub fn create_shadow_map(device: &Device, settings: &ShadowSettings) -> ShadowMap {
    let size = settings.map_size.max(1);
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("Shadow Map"),
        size: Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: SHADOW_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&TextureViewDescriptor::default());

    // Hardware bilinear comparison for the soft filter
    let filter = match settings.filter {
        ShadowFilter::PcfSoft => FilterMode::Linear,
        ShadowFilter::Basic | ShadowFilter::Pcf => FilterMode::Nearest,
    };
    let sampler = device.create_sampler(&SamplerDescriptor {
        label: Some("Shadow Sampler"),
        address_mode_u: AddressMode::ClampToEdge,
        address_mode_v: AddressMode::ClampToEdge,
        address_mode_w: AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: FilterMode::Nearest,
        compare: Some(CompareFunction::LessEqual),
        ..Default::default()
    });

    ShadowMap {
        texture,
        view,
        sampler,
    }
}
