/// Seeded random source for the game.
///
/// The generator lives in an explicit `Random` value that callers pass
/// around by `&mut`, so two games seeded alike replay identically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Debug)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Throw away the current sequence and restart from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Uniform integer in `min..=max`. Caller guarantees `min <= max`.
    pub fn uniform_uint(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max, "uniform_uint: {min} > {max}");
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform float in `min..=max`. Caller guarantees `min <= max`.
    pub fn uniform_float(&mut self, min: f32, max: f32) -> f32 {
        debug_assert!(min <= max, "uniform_float: {min} > {max}");
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// `true` with the given probability.
    pub fn bernoulli(&mut self, probability: f64) -> bool {
        debug_assert!(
            (0.0..=1.0).contains(&probability),
            "bernoulli: probability {probability} outside [0, 1]"
        );
        let p = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self.rng.gen_bool(p)
    }

    /// Fair coin, `bernoulli(0.5)`.
    pub fn coin(&mut self) -> bool {
        self.bernoulli(0.5)
    }
}
