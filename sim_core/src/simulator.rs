//! Box lifecycle simulator
//!
//! Owns every falling box and drives one frame of their life per call to
//! [`Simulator::tick`]: spawn, integrate, bounce, settle, draw.

use glam::Vec3;
use hecs::World;
use log::info;

use crate::components::*;
use crate::config::Config;
use crate::frustum::CameraRig;
use crate::render::{FrameView, Placement, Renderer, RenderableId};
use crate::resources::{Events, GameRng, Time};
use crate::systems::*;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub spawned: Option<RenderableId>,
    pub bounces: usize,
    pub settled: usize,
    pub active: usize,
    pub dt: f32,
}

/// Snapshot of one live box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxState {
    pub id: RenderableId,
    pub position: Vec3,
    pub velocity: f32,
    pub size: Vec3,
    pub color: BoxColor,
}

/// Falling box simulation bound to a renderer
pub struct Simulator<R: Renderer> {
    world: World,
    time: Time,
    config: Config,
    camera: CameraRig,
    events: Events,
    rng: GameRng,
    renderer: R,
    placements: Vec<Placement>,
}

impl<R: Renderer> Simulator<R> {
    /// Create an empty simulation whose first tick measures time from `start_ms`
    pub fn new(config: Config, camera: CameraRig, renderer: R, start_ms: f64) -> Self {
        info!(
            "simulator ready: capacity {}, half extent {:.3}",
            config.capacity,
            camera.half_extent()
        );
        Self {
            world: World::new(),
            time: Time::new(start_ms),
            config,
            camera,
            events: Events::new(),
            rng: GameRng::from_entropy(),
            renderer,
            placements: Vec::new(),
        }
    }

    /// Replace the random source, e.g. with a seeded one for repeatable runs
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    /// Run one frame at timestamp `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> Result<TickReport, R::Error> {
        self.events.clear();

        // 1. Spawn while under capacity
        if let Some(renderable) =
            spawn_if_below_capacity(&mut self.world, &self.camera, &self.config, &mut self.rng)
        {
            self.events.spawned = Some(renderable.id);
            self.renderer.add_renderable(&renderable);
        }

        // 2. Measure elapsed time
        let dt = self.time.measure(now_ms);

        // 3. Integrate
        integrate_boxes(&mut self.world, dt, &self.config);

        // 4. Bounce off the floor
        let floor_y = self.camera.floor_y();
        resolve_floor_contacts(&mut self.world, floor_y, &self.config, &mut self.events);

        // 5. Remove settled boxes
        despawn_settled(&mut self.world, floor_y, &self.config, &mut self.events);
        for id in &self.events.settled {
            self.renderer.remove_renderable(*id);
        }

        // 6. Advance time
        self.time.advance(now_ms);

        // 7. Draw
        self.collect_placements();
        self.renderer.render_frame(&FrameView {
            camera: &self.camera,
            placements: &self.placements,
        })?;

        Ok(TickReport {
            spawned: self.events.spawned,
            bounces: self.events.bounces,
            settled: self.events.settled.len(),
            active: self.placements.len(),
            dt,
        })
    }

    /// Add a box with a chosen position and velocity.
    ///
    /// Returns `None` when the simulation is already at capacity.
    pub fn insert_box(
        &mut self,
        position: Vec3,
        velocity: f32,
        shape: BoxShape,
    ) -> Option<RenderableId> {
        if active_boxes(&self.world) >= self.config.capacity {
            return None;
        }
        let renderable = create_box(&mut self.world, position, velocity, shape);
        self.renderer.add_renderable(&renderable);
        Some(renderable.id)
    }

    pub fn active_count(&self) -> usize {
        active_boxes(&self.world)
    }

    /// All live boxes, ordered by id
    pub fn boxes(&self) -> Vec<BoxState> {
        let mut boxes: Vec<BoxState> = self
            .world
            .query::<(&Transform, &FallingBox, &BoxShape, &RenderHandle)>()
            .iter()
            .map(|(_e, (transform, falling, shape, handle))| BoxState {
                id: handle.0,
                position: transform.position,
                velocity: falling.velocity,
                size: shape.size,
                color: shape.color,
            })
            .collect();
        boxes.sort_by_key(|b| b.id);
        boxes
    }

    /// Look up a live box
    pub fn get_box(&self, id: RenderableId) -> Option<BoxState> {
        self.boxes().into_iter().find(|b| b.id == id)
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Timestamp of the previous tick
    pub fn last_tick_ms(&self) -> f64 {
        self.time.last_tick_ms
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn collect_placements(&mut self) {
        self.placements.clear();
        self.placements.extend(
            self.world
                .query::<(&Transform, &RenderHandle)>()
                .iter()
                .map(|(_e, (transform, handle))| Placement {
                    id: handle.0,
                    position: transform.position,
                }),
        );
        self.placements.sort_by_key(|p| p.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderable;
    use std::convert::Infallible;

    #[derive(Default)]
    struct CountingRenderer {
        added: usize,
        removed: usize,
        frames: usize,
    }

    impl Renderer for CountingRenderer {
        type Error = Infallible;

        fn add_renderable(&mut self, _renderable: &Renderable) {
            self.added += 1;
        }

        fn remove_renderable(&mut self, _id: RenderableId) {
            self.removed += 1;
        }

        fn render_frame(&mut self, _frame: &FrameView<'_>) -> Result<(), Infallible> {
            self.frames += 1;
            Ok(())
        }
    }

    fn simulator() -> Simulator<CountingRenderer> {
        Simulator::new(
            Config::new(),
            CameraRig::default(),
            CountingRenderer::default(),
            0.0,
        )
        .with_rng(GameRng::new(99))
    }

    #[test]
    fn test_first_tick_spawns_and_renders() {
        let mut sim = simulator();
        let report = sim.tick(16.0).unwrap();

        assert!(report.spawned.is_some());
        assert_eq!(report.active, 1);
        assert_eq!(sim.renderer().added, 1);
        assert_eq!(sim.renderer().frames, 1);
    }

    #[test]
    fn test_tick_measures_dt_and_advances_clock() {
        let mut sim = simulator();
        let report = sim.tick(500.0).unwrap();
        assert_eq!(report.dt, 0.5);
        assert_eq!(sim.last_tick_ms(), 500.0);

        let report = sim.tick(750.0).unwrap();
        assert_eq!(report.dt, 0.25);
    }

    #[test]
    fn test_insert_box_respects_capacity() {
        let mut sim = simulator();
        let shape = BoxShape::new(Vec3::ONE, BoxColor(0));
        for _ in 0..10 {
            assert!(sim.insert_box(Vec3::ZERO, 0.0, shape).is_some());
        }
        assert!(sim.insert_box(Vec3::ZERO, 0.0, shape).is_none());
        assert_eq!(sim.active_count(), 10);
        assert_eq!(sim.renderer().added, 10);
    }

    #[test]
    fn test_boxes_sorted_by_id() {
        let mut sim = simulator();
        for i in 1..=5 {
            sim.tick(i as f64).unwrap();
        }
        let boxes = sim.boxes();
        assert_eq!(boxes.len(), 5);
        assert!(boxes.windows(2).all(|w| w[0].id < w[1].id));
    }
}
