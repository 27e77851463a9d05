//! Configuration errors.
//!
//! Degenerate input (no eligible bins) is not an error; it produces an
//! empty [`RoutePlan`](crate::models::RoutePlan). Only configuration that
//! cannot describe a meaningful search is rejected here.

use thiserror::Error;

/// An invalid optimizer configuration, reported before any search begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Vehicle capacity must allow at least one bin per trip.
    #[error("vehicle capacity must be at least 1 bin")]
    ZeroCapacity,

    /// The genetic algorithm needs at least one generation.
    #[error("generation count must be at least 1")]
    ZeroGenerations,

    /// The ant colony needs at least one iteration.
    #[error("iteration count must be at least 1")]
    ZeroIterations,

    /// Population or colony size cap is too small to search.
    #[error("{name} must be at least {min}, got {value}")]
    TooSmall {
        /// Parameter name.
        name: &'static str,
        /// Smallest accepted value.
        min: usize,
        /// Supplied value.
        value: usize,
    },

    /// A fill-level threshold outside `[0, 100]` or non-finite.
    #[error("fill-level threshold must be within [0, 100], got {0}")]
    InvalidThreshold(f64),

    /// A real-valued tuning parameter outside its domain.
    #[error("parameter {name} out of range: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Supplied value.
        value: f64,
    },

    /// Algorithm selector not one of `genetic`, `ant_colony`, `nearest_neighbor`.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Checks that a fill-level threshold lies in `[0, 100]`.
pub(crate) fn check_threshold(threshold: f64) -> Result<(), ConfigError> {
    if threshold.is_finite() && (0.0..=100.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold(threshold))
    }
}

/// Checks that `value` is finite and within `range`.
pub(crate) fn check_range(
    name: &'static str,
    value: f64,
    range: std::ops::RangeInclusive<f64>,
) -> Result<(), ConfigError> {
    if value.is_finite() && range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
