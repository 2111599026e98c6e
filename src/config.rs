//! Construction-time tunables.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default promotion probability.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Default cap on the number of levels.
pub const DEFAULT_MAX_LEVEL: usize = 20;

/// Largest accepted `max_level`. Beyond this, towers could never fill the extra levels in
/// any list that fits in memory.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Tunables for an [`IndexedSkipList`](crate::IndexedSkipList).
///
/// ```
/// use indexed_skiplist::SkipListConfig;
///
/// let config = SkipListConfig::default().with_probability(0.25).with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkipListConfig {
    /// Chance that a tower grows by one more level, in `[0, 1)`.
    pub probability: f64,
    /// Hard cap on tower height and list height.
    pub max_level: usize,
    /// Seed for level draws. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl SkipListConfig {
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.probability) {
            return Err(ConfigError::InvalidProbability(self.probability));
        }
        if self.max_level == 0 {
            return Err(ConfigError::ZeroMaxLevel);
        }
        if self.max_level > MAX_LEVEL_LIMIT {
            return Err(ConfigError::MaxLevelTooLarge {
                max_level: self.max_level,
                limit: MAX_LEVEL_LIMIT,
            });
        }
        Ok(())
    }
}

impl Default for SkipListConfig {
    fn default() -> Self {
        SkipListConfig {
            probability: DEFAULT_PROBABILITY,
            max_level: DEFAULT_MAX_LEVEL,
            seed: None,
        }
    }
}
