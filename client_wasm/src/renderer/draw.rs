use super::GpuRenderer;
use crate::error::ClientError;
use wgpu::*;

pub fn draw_frame(renderer: &mut GpuRenderer) -> Result<(), ClientError> {
    let output = match renderer.surface.get_current_texture() {
        Ok(output) => output,
        Err(SurfaceError::Lost | SurfaceError::Outdated) => {
            // Skip this frame, the next one draws to the fresh surface
            log::warn!("surface lost, reconfiguring");
            renderer
                .surface
                .configure(&renderer.device, &renderer.surface_config);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let view = output.texture.create_view(&TextureViewDescriptor::default());
    let mut encoder = renderer
        .device
        .create_command_encoder(&CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

    let count = renderer.instances.len() as u32;

    // 1. Shadow pass
    if renderer.settings.shadows.enabled {
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: &renderer.shadow_map.view,
                depth_ops: Some(Operations {
                    load: LoadOp::Clear(1.0),
                    store: StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        if count > 0 {
            pass.set_pipeline(&renderer.shadow_pipeline);
            pass.set_bind_group(0, &renderer.shadow_bind_group, &[]);
            draw_boxes(renderer, &mut pass, count);
        }
    }

    // 2. Main pass
    {
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Main Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(renderer.settings.clear_color),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: &renderer.depth.view,
                depth_ops: Some(Operations {
                    load: LoadOp::Clear(1.0),
                    store: StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        if count > 0 {
            pass.set_pipeline(&renderer.box_pipeline);
            pass.set_bind_group(0, &renderer.scene_bind_group, &[]);
            draw_boxes(renderer, &mut pass, count);
        }
    }

    renderer.queue.submit(std::iter::once(encoder.finish()));
    output.present();

    Ok(())
}

fn draw_boxes(renderer: &GpuRenderer, pass: &mut RenderPass<'_>, count: u32) {
    pass.set_vertex_buffer(0, renderer.cube.vertex_buffer.slice(..));
    pass.set_vertex_buffer(1, renderer.buffers.instances.slice(..));
    pass.set_index_buffer(renderer.cube.index_buffer.slice(..), IndexFormat::Uint16);
    pass.draw_indexed(0..renderer.cube.index_count, 0, 0..count);
}
