use std::ops::Range;

use crate::params::Params;

/// Simulation configuration, fixed once a simulator is built
#[derive(Debug, Clone)]
pub struct Config {
    pub capacity: usize,
    pub gravity: f32,
    pub restitution: f32,
    pub rest_velocity_threshold: f32,
    pub box_size_min: f32,
    pub box_size_max: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: Params::CAPACITY,
            gravity: Params::GRAVITY,
            restitution: Params::RESTITUTION,
            rest_velocity_threshold: Params::REST_VELOCITY_THRESHOLD,
            box_size_min: Params::BOX_SIZE_MIN,
            box_size_max: Params::BOX_SIZE_MAX,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Range each box dimension is drawn from
    pub fn box_size_range(&self) -> Range<f32> {
        self.box_size_min..self.box_size_max
    }

    /// Range of the initial falling speed: `[0, gravity)`
    pub fn spawn_velocity_range(&self) -> Range<f32> {
        0.0..self.gravity
    }

    /// A box resting at the floor with a speed below the threshold is settled
    pub fn is_at_rest(&self, velocity: f32) -> bool {
        velocity.abs() < self.rest_velocity_threshold
    }
}
