use std::ops::Range;

use rand::Rng;

use crate::render::RenderableId;

/// Frame timing, measured from the driver's timestamps
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub last_tick_ms: f64, // Timestamp of the previous tick
    pub dt: f32,           // Seconds since the previous tick
}

impl Time {
    pub fn new(start_ms: f64) -> Self {
        Self {
            last_tick_ms: start_ms,
            dt: 0.0,
        }
    }

    /// Measure the seconds elapsed between the previous tick and `now_ms`
    pub fn measure(&mut self, now_ms: f64) -> f32 {
        self.dt = ((now_ms - self.last_tick_ms) / 1000.0) as f32;
        self.dt
    }

    /// Make `now_ms` the previous tick
    pub fn advance(&mut self, now_ms: f64) {
        self.last_tick_ms = now_ms;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Seed from the platform's entropy source
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }

    /// Uniform sample from a half-open range; an empty range yields its start
    pub fn sample(&mut self, range: Range<f32>) -> f32 {
        if range.is_empty() {
            range.start
        } else {
            self.0.gen_range(range)
        }
    }

    /// Uniform integer in `[0, max)`; zero when `max` is zero
    pub fn below(&mut self, max: u32) -> u32 {
        if max == 0 {
            0
        } else {
            self.0.gen_range(0..max)
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub spawned: Option<RenderableId>,
    pub bounces: usize,
    pub settled: Vec<RenderableId>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.spawned = None;
        self.bounces = 0;
        self.settled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_measure_converts_ms_to_seconds() {
        let mut time = Time::new(1000.0);
        let dt = time.measure(1250.0);
        assert_eq!(dt, 0.25);
        assert_eq!(time.dt, 0.25);
        // Measuring does not move the previous tick
        assert_eq!(time.last_tick_ms, 1000.0);
    }

    #[test]
    fn test_time_advance() {
        let mut time = Time::new(0.0);
        time.advance(16.0);
        assert_eq!(time.last_tick_ms, 16.0);
        assert_eq!(time.measure(16.0), 0.0);
    }

    #[test]
    fn test_rng_sample_within_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let v = rng.sample(1.0..3.0);
            assert!((1.0..3.0).contains(&v), "sample {v} out of range");
        }
    }

    #[test]
    fn test_rng_sample_empty_range_yields_start() {
        let mut rng = GameRng::default();
        assert_eq!(rng.sample(0.0..0.0), 0.0);
        assert_eq!(rng.sample(2.0..-2.0), 2.0);
    }

    #[test]
    fn test_rng_below() {
        let mut rng = GameRng::default();
        assert_eq!(rng.below(0), 0);
        for _ in 0..100 {
            assert!(rng.below(5) < 5);
        }
    }

    #[test]
    fn test_rng_is_deterministic_per_seed() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        for _ in 0..10 {
            assert_eq!(a.sample(0.0..1.0), b.sample(0.0..1.0));
        }
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.spawned = Some(RenderableId(3));
        events.bounces = 2;
        events.settled.push(RenderableId(1));

        events.clear();

        assert!(events.spawned.is_none());
        assert_eq!(events.bounces, 0);
        assert!(events.settled.is_empty());
    }
}
