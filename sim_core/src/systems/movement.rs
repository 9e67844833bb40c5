use crate::components::{FallingBox, Transform};
use crate::config::Config;
use hecs::World;

/// Advance every box by `dt` seconds.
///
/// Position moves first using the current velocity, then gravity is added to
/// the velocity. Gravity is added even after a bounce has made the velocity
/// negative, so it eats into the rebound every frame.
pub fn integrate_boxes(world: &mut World, dt: f32, config: &Config) {
    for (_entity, (transform, falling)) in world.query_mut::<(&mut Transform, &mut FallingBox)>() {
        transform.position.y -= falling.velocity * dt;
        falling.velocity += config.gravity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BoxColor, BoxShape};
    use crate::systems::create_box;
    use approx::assert_abs_diff_eq;
    use glam::Vec3;

    fn spawn(world: &mut World, y: f32, velocity: f32) -> hecs::Entity {
        let shape = BoxShape::new(Vec3::ONE, BoxColor(0));
        let renderable = create_box(world, Vec3::new(0.0, y, 0.0), velocity, shape);
        hecs::Entity::from_bits(renderable.id.0).unwrap()
    }

    #[test]
    fn test_falling_box_moves_down_then_accelerates() {
        let mut world = World::new();
        let config = Config::new();
        let e = spawn(&mut world, 5.0, 2.0);

        integrate_boxes(&mut world, 0.5, &config);

        let transform = *world.get::<&Transform>(e).unwrap();
        let falling = *world.get::<&FallingBox>(e).unwrap();
        // Uses the velocity from before gravity was applied
        assert_abs_diff_eq!(transform.position.y, 4.0, epsilon = 1e-6);
        assert_abs_diff_eq!(falling.velocity, 2.0 + 9.8 * 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_rising_box_still_gains_gravity() {
        let mut world = World::new();
        let config = Config::new();
        let e = spawn(&mut world, 0.0, -4.0);

        integrate_boxes(&mut world, 0.1, &config);

        let transform = *world.get::<&Transform>(e).unwrap();
        let falling = *world.get::<&FallingBox>(e).unwrap();
        assert_abs_diff_eq!(transform.position.y, 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(falling.velocity, -4.0 + 0.98, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut world = World::new();
        let config = Config::new();
        let e = spawn(&mut world, 3.25, 7.5);

        integrate_boxes(&mut world, 0.0, &config);

        assert_eq!(world.get::<&Transform>(e).unwrap().position.y, 3.25);
        assert_eq!(world.get::<&FallingBox>(e).unwrap().velocity, 7.5);
    }

    #[test]
    fn test_x_and_z_untouched() {
        let mut world = World::new();
        let config = Config::new();
        let shape = BoxShape::new(Vec3::ONE, BoxColor(0));
        let renderable = create_box(&mut world, Vec3::new(1.5, 2.0, -0.5), 1.0, shape);
        let e = hecs::Entity::from_bits(renderable.id.0).unwrap();

        integrate_boxes(&mut world, 0.25, &config);

        let position = world.get::<&Transform>(e).unwrap().position;
        assert_eq!(position.x, 1.5);
        assert_eq!(position.z, -0.5);
    }
}
