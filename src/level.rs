//! Random tower heights.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws tower heights from a geometric distribution truncated at `max_level`.
///
/// Each extra level is granted with chance `probability`, so the expected height is
/// `1 / (1 - probability)`. Heights at the cap are slightly more likely than an unbounded
/// distribution would make them, since every taller draw is clamped down to it.
pub(crate) struct LevelGenerator {
    rng: StdRng,
    probability: f64,
    max_level: usize,
}

impl LevelGenerator {
    pub(crate) fn new(probability: f64, max_level: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        LevelGenerator {
            rng,
            probability,
            max_level,
        }
    }

    pub(crate) fn probability(&self) -> f64 {
        self.probability
    }

    pub(crate) fn max_level(&self) -> usize {
        self.max_level
    }

    /// Returns a value in `1..=max_level`.
    pub(crate) fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < self.max_level && self.rng.gen_bool(self.probability) {
            level += 1;
        }
        level
    }
}
