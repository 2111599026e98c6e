//! Error types.

use thiserror::Error;

/// A position outside the valid range was passed to a positional operation.
///
/// For `get`, `set` and `remove` the valid range is `0..len`; for `insert` it is `0..=len`.
/// The list is never modified when this error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for length {len}")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Rejected [`SkipListConfig`](crate::SkipListConfig) values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("promotion probability must be in [0, 1), got {0}")]
    InvalidProbability(f64),
    #[error("max level must be at least 1")]
    ZeroMaxLevel,
    #[error("max level {max_level} exceeds the limit of {limit}")]
    MaxLevelTooLarge { max_level: usize, limit: usize },
}
