use glam::Vec3;
use hecs::World;
use log::debug;

use crate::components::*;
use crate::config::Config;
use crate::frustum::CameraRig;
use crate::params::Params;
use crate::render::{Renderable, RenderableId};
use crate::resources::GameRng;

/// Number of boxes currently simulated
pub fn active_boxes(world: &World) -> usize {
    world.query::<&FallingBox>().iter().count()
}

/// Spawn one random box at the top of the view if there is room for it
pub fn spawn_if_below_capacity(
    world: &mut World,
    camera: &CameraRig,
    config: &Config,
    rng: &mut GameRng,
) -> Option<Renderable> {
    if active_boxes(world) >= config.capacity {
        return None;
    }
    Some(spawn_random_box(world, camera, config, rng))
}

/// Spawn a box with random size, color, column and initial speed
pub fn spawn_random_box(
    world: &mut World,
    camera: &CameraRig,
    config: &Config,
    rng: &mut GameRng,
) -> Renderable {
    let size_range = config.box_size_range();
    let size = Vec3::new(
        rng.sample(size_range.clone()),
        rng.sample(size_range.clone()),
        rng.sample(size_range),
    );
    let color = BoxColor(rng.below(Params::BOX_COLOR_MAX));

    let x = rng.sample(camera.spawn_x_range());
    let position = Vec3::new(x, camera.top_y(), 0.0);
    let velocity = rng.sample(config.spawn_velocity_range());

    create_box(world, position, velocity, BoxShape::new(size, color))
}

/// Create a box entity and describe it for the renderer
pub fn create_box(world: &mut World, position: Vec3, velocity: f32, shape: BoxShape) -> Renderable {
    let entity = world.reserve_entity();
    let id = RenderableId::from(entity);
    world.spawn_at(
        entity,
        (
            Transform::new(position),
            FallingBox::new(velocity),
            shape,
            RenderHandle(id),
        ),
    );

    debug!(
        "spawned box {:?} at ({:.2}, {:.2}) falling at {:.2}",
        id, position.x, position.y, velocity
    );

    Renderable {
        id,
        position,
        size: shape.size,
        color: shape.color,
        cast_shadow: true,
        receive_shadow: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (World, CameraRig, Config, GameRng) {
        (
            World::new(),
            CameraRig::default(),
            Config::new(),
            GameRng::new(12345),
        )
    }

    #[test]
    fn test_spawn_places_box_at_top_boundary() {
        let (mut world, camera, config, mut rng) = setup();
        let renderable = spawn_random_box(&mut world, &camera, &config, &mut rng);

        assert_eq!(renderable.position.y, camera.top_y());
        assert_eq!(renderable.position.z, 0.0);
        let range = camera.spawn_x_range();
        assert!(range.contains(&renderable.position.x));
    }

    #[test]
    fn test_spawn_randomizes_within_config_ranges() {
        let (mut world, camera, config, mut rng) = setup();
        for _ in 0..50 {
            let renderable = spawn_random_box(&mut world, &camera, &config, &mut rng);
            for dim in renderable.size.to_array() {
                assert!((1.0..3.0).contains(&dim), "dimension {dim} out of range");
            }
            assert!(renderable.color.0 < 0xff_ffff);
        }
        for (_e, falling) in world.query::<&FallingBox>().iter() {
            assert!((0.0..config.gravity).contains(&falling.velocity));
        }
    }

    #[test]
    fn test_spawned_box_links_to_renderable() {
        let (mut world, camera, config, mut rng) = setup();
        let renderable = spawn_random_box(&mut world, &camera, &config, &mut rng);

        let mut handles = world.query::<&RenderHandle>();
        let handle = handles.iter().next().map(|(_e, h)| *h);
        assert_eq!(handle, Some(RenderHandle(renderable.id)));
        assert!(renderable.cast_shadow);
        assert!(renderable.receive_shadow);
    }

    #[test]
    fn test_spawn_respects_capacity() {
        let (mut world, camera, mut config, mut rng) = setup();
        config.capacity = 3;

        for _ in 0..3 {
            assert!(spawn_if_below_capacity(&mut world, &camera, &config, &mut rng).is_some());
        }
        assert!(spawn_if_below_capacity(&mut world, &camera, &config, &mut rng).is_none());
        assert_eq!(active_boxes(&world), 3);
    }

    #[test]
    fn test_zero_capacity_never_spawns() {
        let (mut world, camera, mut config, mut rng) = setup();
        config.capacity = 0;
        assert!(spawn_if_below_capacity(&mut world, &camera, &config, &mut rng).is_none());
        assert_eq!(active_boxes(&world), 0);
    }
}
