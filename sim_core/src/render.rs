//! Renderer seam
//!
//! The simulation never draws. It describes each box once when it spawns,
//! forgets it when it settles, and once per tick hands over where every live
//! box is. Anything implementing [`Renderer`] can sit on the other side: the
//! WebGPU client, or a recording stub in tests.

use glam::Vec3;

use crate::components::BoxColor;
use crate::frustum::CameraRig;

/// Stable identifier shared by a physics entity and its renderable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderableId(pub u64);

impl From<hecs::Entity> for RenderableId {
    fn from(entity: hecs::Entity) -> Self {
        Self(entity.to_bits().get())
    }
}

/// Everything a renderer needs to create a box's visual
#[derive(Debug, Clone, Copy)]
pub struct Renderable {
    pub id: RenderableId,
    pub position: Vec3,
    pub size: Vec3,
    pub color: BoxColor,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// Current position of one renderable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub id: RenderableId,
    pub position: Vec3,
}

/// The scene as of the end of a tick
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub camera: &'a CameraRig,
    pub placements: &'a [Placement],
}

/// Shadow-map filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowFilter {
    /// Single depth comparison
    Basic,
    /// Percentage-closer filtering over a small kernel
    Pcf,
    /// Wider PCF kernel with bilinear weights
    #[default]
    PcfSoft,
}

/// Renderer-side shadow configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowSettings {
    pub enabled: bool,
    pub filter: ShadowFilter,
    pub map_size: u32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            filter: ShadowFilter::PcfSoft,
            map_size: 1024,
        }
    }
}

/// Draws the boxes the simulation owns
pub trait Renderer {
    type Error;

    /// A box was spawned
    fn add_renderable(&mut self, renderable: &Renderable);

    /// A box settled and left the simulation
    fn remove_renderable(&mut self, id: RenderableId);

    /// Draw one frame
    fn render_frame(&mut self, frame: &FrameView<'_>) -> Result<(), Self::Error>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    type Error = R::Error;

    fn add_renderable(&mut self, renderable: &Renderable) {
        (**self).add_renderable(renderable);
    }

    fn remove_renderable(&mut self, id: RenderableId) {
        (**self).remove_renderable(id);
    }

    fn render_frame(&mut self, frame: &FrameView<'_>) -> Result<(), Self::Error> {
        (**self).render_frame(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderable_id_from_entity_is_stable() {
        let mut world = hecs::World::new();
        let a = world.spawn(());
        let b = world.spawn(());
        assert_eq!(RenderableId::from(a), RenderableId::from(a));
        assert_ne!(RenderableId::from(a), RenderableId::from(b));
    }

    #[test]
    fn test_renderable_id_not_reused_after_despawn() {
        let mut world = hecs::World::new();
        let a = world.spawn(());
        let first = RenderableId::from(a);
        world.despawn(a).unwrap();
        let b = world.spawn(());
        // Slot is recycled but the generation differs
        assert_ne!(first, RenderableId::from(b));
    }

    #[test]
    fn test_default_shadow_settings_are_soft() {
        let settings = ShadowSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.filter, ShadowFilter::PcfSoft);
    }
}
