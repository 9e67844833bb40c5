use crate::components::{FallingBox, Transform};
use crate::config::Config;
use crate::resources::Events;
use hecs::World;
use log::trace;

/// Bounce boxes that went through the floor.
///
/// A box below `floor_y` is put back exactly on it and its velocity is
/// reversed and scaled by the restitution. No sub-stepping: however far a
/// box overshot during the tick, the overshoot is discarded.
pub fn resolve_floor_contacts(
    world: &mut World,
    floor_y: f32,
    config: &Config,
    events: &mut Events,
) {
    for (entity, (transform, falling)) in world.query_mut::<(&mut Transform, &mut FallingBox)>() {
        if transform.position.y < floor_y {
            transform.position.y = floor_y;
            falling.velocity = -falling.velocity * config.restitution;
            events.bounces += 1;
            trace!(
                "box {:?} bounced, velocity now {:.3}",
                entity, falling.velocity
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BoxColor, BoxShape};
    use crate::systems::create_box;
    use glam::Vec3;

    fn setup() -> (World, Config, Events) {
        (World::new(), Config::new(), Events::new())
    }

    fn spawn(world: &mut World, y: f32, velocity: f32) -> hecs::Entity {
        let shape = BoxShape::new(Vec3::splat(2.0), BoxColor(0x336699));
        let renderable = create_box(world, Vec3::new(0.0, y, 0.0), velocity, shape);
        hecs::Entity::from_bits(renderable.id.0).unwrap()
    }

    #[test]
    fn test_box_below_floor_is_clamped_and_bounced() {
        let (mut world, config, mut events) = setup();
        let floor_y = -7.5;
        let e = spawn(&mut world, -9.0, 6.0);

        resolve_floor_contacts(&mut world, floor_y, &config, &mut events);

        assert_eq!(world.get::<&Transform>(e).unwrap().position.y, floor_y);
        assert_eq!(world.get::<&FallingBox>(e).unwrap().velocity, -3.0);
        assert_eq!(events.bounces, 1);
    }

    #[test]
    fn test_box_exactly_on_floor_does_not_bounce() {
        let (mut world, config, mut events) = setup();
        let e = spawn(&mut world, -7.5, 0.5);

        resolve_floor_contacts(&mut world, -7.5, &config, &mut events);

        assert_eq!(world.get::<&FallingBox>(e).unwrap().velocity, 0.5);
        assert_eq!(events.bounces, 0);
    }

    #[test]
    fn test_airborne_box_untouched() {
        let (mut world, config, mut events) = setup();
        let e = spawn(&mut world, 2.0, 4.0);

        resolve_floor_contacts(&mut world, -7.5, &config, &mut events);

        assert_eq!(world.get::<&Transform>(e).unwrap().position.y, 2.0);
        assert_eq!(world.get::<&FallingBox>(e).unwrap().velocity, 4.0);
        assert_eq!(events.bounces, 0);
    }

    #[test]
    fn test_deep_overshoot_still_lands_exactly_on_floor() {
        let (mut world, config, mut events) = setup();
        let floor_y = -7.673_27;
        let e = spawn(&mut world, -500.0, 80.0);

        resolve_floor_contacts(&mut world, floor_y, &config, &mut events);

        assert_eq!(world.get::<&Transform>(e).unwrap().position.y, floor_y);
        assert_eq!(world.get::<&FallingBox>(e).unwrap().velocity, -40.0);
    }
}
