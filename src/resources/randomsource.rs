//! Random number source for goal jitter.
//!
//! Wraps a [`fastrand::Rng`] so systems share one generator and tests can
//! seed it for reproducible goals.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

/// Shared random generator used when drawing timer goals.
#[derive(Resource, Debug, Clone)]
pub struct RandomSource {
    rng: Rng,
}

impl Default for RandomSource {
    fn default() -> Self {
        RandomSource { rng: Rng::new() }
    }
}

impl RandomSource {
    /// Create a deterministic source from a seed.
    pub fn with_seed(seed: u64) -> Self {
        RandomSource {
            rng: Rng::with_seed(seed),
        }
    }

    /// Sample a uniform f32 between `min` and `max`.
    ///
    /// The bounds are not reordered: with `min > max` the sample still lands
    /// between the two values.
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.rng.f32() * (max - min)
    }
}
