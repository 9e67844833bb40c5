use hecs::World;
use log::debug;

use crate::components::{FallingBox, RenderHandle, Transform};
use crate::config::Config;
use crate::resources::Events;

/// Despawn boxes that came to rest on the floor.
///
/// A box is settled when its height is exactly `floor_y`, which only holds
/// for boxes clamped there by a bounce and not yet risen again, and its
/// speed is below the rest threshold. Ids of the removed boxes are recorded
/// in `events.settled` so the renderer can drop them too.
pub fn despawn_settled(
    world: &mut World,
    floor_y: f32,
    config: &Config,
    events: &mut Events,
) {
    let mut to_remove = Vec::new();

    for (entity, (transform, falling, handle)) in world
        .query::<(&Transform, &FallingBox, &RenderHandle)>()
        .iter()
    {
        if transform.position.y == floor_y && config.is_at_rest(falling.velocity) {
            to_remove.push((entity, handle.0));
        }
    }

    for (entity, id) in to_remove {
        let _ = world.despawn(entity);
        debug!("box {:?} settled", id);
        events.settled.push(id);
    }
}
