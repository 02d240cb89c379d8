//! Error types for probability-space operations.
//!
//! Query operations never fail; this enum covers writes past the universe,
//! combining values built over different universes, and the closure guards.

use thiserror::Error;

use crate::outcome::OutcomeId;

/// Errors raised by mutating or combining operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// Outcome identity outside `[0, size)`
    #[error("outcome id {id} is out of range for a universe of {size} outcomes")]
    OutOfRange { id: OutcomeId, size: usize },

    /// Two values were built against universes of different sizes
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Closure refused up front because the universe is too large
    #[error("universe of {outcomes} outcomes exceeds the closure limit of {limit}")]
    UniverseTooLarge { outcomes: usize, limit: usize },

    /// Closure grew past the configured event budget
    #[error("closure reached {events} events, exceeding the limit of {limit}")]
    ClosureTooLarge { events: usize, limit: usize },

    /// Measure failed normalization or non-negativity
    #[error("invalid probability measure: {0}")]
    InvalidMeasure(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// Simulation recording step of zero
    #[error("recording step must be greater than 0")]
    EmptyStep,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SpaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_out_of_range() {
        let e = SpaceError::OutOfRange { id: 7, size: 3 };
        assert_eq!(
            e.to_string(),
            "outcome id 7 is out of range for a universe of 3 outcomes"
        );
    }

    #[test]
    fn test_display_size_mismatch() {
        let e = SpaceError::SizeMismatch {
            expected: 4,
            actual: 2,
        };
        assert_eq!(e.to_string(), "size mismatch: expected 4, got 2");
    }
}
