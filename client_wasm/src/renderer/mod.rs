//! WebGPU renderer for the falling boxes
//!
//! Keeps one [`Renderable`] per live box and draws them all as instances of
//! a single unit cube: a depth pass from the light fills the shadow map, then
//! the main pass draws flat colors darkened where a box is in shadow.

pub mod draw;
pub mod init;
pub mod pipeline;
pub mod resources;
pub mod shaders;

use std::collections::HashMap;

use crate::camera::{Camera, CameraUniform, LightUniform, ShadowLight};
use crate::error::ClientError;
use crate::mesh::{create_cube, Mesh};
use log::{debug, warn};
use resources::{DepthTexture, InstanceData, SceneBuffers, ShadowMap};
use sim_core::{CameraRig, FrameView, Renderable, RenderableId, Renderer, ShadowSettings};
use wgpu::*;

/// Upper bound on boxes drawn per frame
pub const MAX_INSTANCES: usize = 64;

/// Look of the rendered scene
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub clear_color: Color,
    pub shadows: ShadowSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            shadows: ShadowSettings::default(),
        }
    }
}

#[allow(dead_code)]
pub struct GpuRenderer {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub surface_config: SurfaceConfiguration,
    pub size: (u32, u32),
    pub settings: RenderSettings,

    // Pipelines
    pub box_pipeline: RenderPipeline,
    pub shadow_pipeline: RenderPipeline,

    // Bind Groups
    pub scene_bind_group: BindGroup,
    pub shadow_bind_group: BindGroup,

    // Resources
    pub buffers: SceneBuffers,
    pub depth: DepthTexture,
    pub shadow_map: ShadowMap,
    pub cube: Mesh,

    // State
    renderables: HashMap<RenderableId, Renderable>,
    instances: Vec<InstanceData>,
    camera_rig: Option<CameraRig>,
}

impl GpuRenderer {
    pub async fn new(
        canvas: web_sys::HtmlCanvasElement,
        rig: &CameraRig,
        settings: RenderSettings,
    ) -> Result<Self, ClientError> {
        let ctx = init::init_wgpu(canvas).await?;

        let camera = CameraUniform::from_camera(&Camera::from_rig(rig));
        let light = LightUniform::new(&ShadowLight::covering(rig), &settings.shadows);
        let buffers = resources::create_buffers(&ctx.device, &camera, &light, MAX_INSTANCES);
        let depth = resources::create_depth_texture(&ctx.device, &ctx.config);
        let shadow_map = resources::create_shadow_map(&ctx.device, &settings.shadows);
        let pipes = pipeline::create_pipelines(&ctx.device, ctx.config.format);

        let (vertices, indices) = create_cube();
        let cube = Mesh::new(&ctx.device, &ctx.queue, &vertices, &indices);

        // Bind Groups
        let scene_bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &pipes.scene_layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: buffers.camera.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: buffers.light.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 2,
                    resource: BindingResource::TextureView(&shadow_map.view),
                },
                BindGroupEntry {
                    binding: 3,
                    resource: BindingResource::Sampler(&shadow_map.sampler),
                },
            ],
        });

        let shadow_bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("Shadow Bind Group"),
            layout: &pipes.shadow_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: buffers.light.as_entire_binding(),
            }],
        });

        Ok(Self {
            device: ctx.device,
            queue: ctx.queue,
            surface: ctx.surface,
            surface_config: ctx.config,
            size: ctx.size,
            settings,
            box_pipeline: pipes.box_pipeline,
            shadow_pipeline: pipes.shadow_pipeline,
            scene_bind_group,
            shadow_bind_group,
            buffers,
            depth,
            shadow_map,
            cube,
            renderables: HashMap::new(),
            instances: Vec::with_capacity(MAX_INSTANCES),
            camera_rig: Some(*rig),
        })
    }

    fn update_uniforms(&mut self, rig: &CameraRig) {
        if self.camera_rig.as_ref() == Some(rig) {
            return;
        }
        let camera = CameraUniform::from_camera(&Camera::from_rig(rig));
        let light = LightUniform::new(&ShadowLight::covering(rig), &self.settings.shadows);
        self.queue
            .write_buffer(&self.buffers.camera, 0, bytemuck::cast_slice(&[camera]));
        self.queue
            .write_buffer(&self.buffers.light, 0, bytemuck::cast_slice(&[light]));
        self.camera_rig = Some(*rig);
    }

    fn update_instances(&mut self, frame: &FrameView<'_>) {
        self.instances.clear();
        for placement in frame.placements {
            match self.renderables.get(&placement.id) {
                Some(renderable) => self
                    .instances
                    .push(InstanceData::new(renderable, placement.position)),
                None => warn!("no renderable for {:?}", placement.id),
            }
        }

        if self.instances.len() > self.buffers.max_instances {
            warn!(
                "{} boxes exceed the instance buffer, drawing {}",
                self.instances.len(),
                self.buffers.max_instances
            );
            self.instances.truncate(self.buffers.max_instances);
        }

        if !self.instances.is_empty() {
            self.queue.write_buffer(
                &self.buffers.instances,
                0,
                bytemuck::cast_slice(&self.instances),
            );
        }
    }
}

impl Renderer for GpuRenderer {
    type Error = ClientError;

    fn add_renderable(&mut self, renderable: &Renderable) {
        debug!("add renderable {:?}", renderable.id);
        self.renderables.insert(renderable.id, *renderable);
    }

    fn remove_renderable(&mut self, id: RenderableId) {
        if self.renderables.remove(&id).is_none() {
            warn!("removing unknown renderable {:?}", id);
        }
    }

    fn render_frame(&mut self, frame: &FrameView<'_>) -> Result<(), ClientError> {
        self.update_uniforms(frame.camera);
        self.update_instances(frame);
        draw::draw_frame(self)
    }
}
