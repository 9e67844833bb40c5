//! Cameras for the box scene
//!
//! A perspective camera matching the simulation's `CameraRig`, and the
//! orthographic projection of the directional light used for shadows.

use glam::{Mat4, Vec3};
use sim_core::{CameraRig, ShadowFilter, ShadowSettings};

/// Camera struct
pub struct Camera {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Camera {
    /// Perspective camera looking down -Z from the rig's position
    pub fn from_rig(rig: &CameraRig) -> Self {
        let eye = rig.position;
        let target = Vec3::new(rig.position.x, rig.position.y, 0.0);
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let projection =
            Mat4::perspective_rh(rig.fov_degrees.to_radians(), rig.aspect, rig.near, rig.far);

        Self { view, projection }
    }
}

/// Camera uniform data (matches WGSL struct, 256-byte aligned)
#[repr(C, align(256))]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4], // 64 bytes (mat4x4)
    _padding: [f32; 48],      // 192 bytes padding (48 * 4) to reach 256 bytes
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        let view_proj = camera.projection * camera.view;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            _padding: [0.0; 48],
        }
    }
}

/// Directional light casting the box shadows
pub struct ShadowLight {
    pub view_proj: Mat4,
}

impl ShadowLight {
    const DIRECTION: Vec3 = Vec3::new(0.35, -1.0, -0.45);
    const DISTANCE: f32 = 30.0;
    const NEAR: f32 = 1.0;
    const FAR: f32 = 60.0;

    /// Light covering the visible area of `rig`, with a margin for box size
    pub fn covering(rig: &CameraRig) -> Self {
        let centre = Vec3::new(rig.position.x, rig.position.y, 0.0);
        let eye = centre - Self::DIRECTION.normalize() * Self::DISTANCE;
        let view = Mat4::look_at_rh(eye, centre, Vec3::Y);

        let half = rig.half_extent() * rig.aspect.max(1.0) + 4.0;
        let projection = Mat4::orthographic_rh(-half, half, -half, half, Self::NEAR, Self::FAR);

        Self {
            view_proj: projection * view,
        }
    }
}

/// Light uniform data (matches WGSL `Light`)
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    view_proj: [[f32; 4]; 4],
    // x: shadows on, y: PCF radius in texels, z: texel size, w: shadow darkness
    params: [f32; 4],
}

impl LightUniform {
    const SHADOW_DARKNESS: f32 = 0.45;

    pub fn new(light: &ShadowLight, settings: &ShadowSettings) -> Self {
        let radius = match settings.filter {
            ShadowFilter::Basic => 0.0,
            ShadowFilter::Pcf => 1.0,
            ShadowFilter::PcfSoft => 2.0,
        };
        Self {
            view_proj: light.view_proj.to_cols_array_2d(),
            params: [
                if settings.enabled { 1.0 } else { 0.0 },
                radius,
                1.0 / settings.map_size.max(1) as f32,
                Self::SHADOW_DARKNESS,
            ],
        }
    }
}
