use glam::Vec3;

use crate::render::RenderableId;

/// World position of an entity
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// Falling box component - only the vertical axis is simulated
#[derive(Debug, Clone, Copy)]
pub struct FallingBox {
    /// Positive while falling. Flips sign on a bounce, but gravity is
    /// always added to it, whatever its sign.
    pub velocity: f32,
}

impl FallingBox {
    pub fn new(velocity: f32) -> Self {
        Self { velocity }
    }
}

/// 24-bit RGB color, `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxColor(pub u32);

impl BoxColor {
    /// Color channels in `[0, 1]`
    pub fn to_rgb(self) -> [f32; 3] {
        let r = (self.0 >> 16) & 0xff;
        let g = (self.0 >> 8) & 0xff;
        let b = self.0 & 0xff;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}

/// Immutable appearance chosen at spawn
#[derive(Debug, Clone, Copy)]
pub struct BoxShape {
    pub size: Vec3, // width, height, depth
    pub color: BoxColor,
}

impl BoxShape {
    pub fn new(size: Vec3, color: BoxColor) -> Self {
        Self { size, color }
    }
}

/// Link from a physics entity to its renderable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub RenderableId);
