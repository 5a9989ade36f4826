//! Error types for PathForge

use thiserror::Error;

use crate::param::ParamError;

/// Main error type for PathForge operations.
///
/// Everything here is a configuration error: detected when the hierarchy is
/// built or a problem is bound, and fatal for that call. Planning outcomes
/// (exhausted, cancelled) are statuses, never errors.
#[derive(Debug, Error)]
pub enum PathForgeError {
    /// A hierarchy needs at least one level.
    #[error("Hierarchy must contain at least one level")]
    EmptyHierarchy,

    /// Level dimensions must be non-decreasing from coarse to fine.
    #[error(
        "Level {level} has dimension {current}, smaller than dimension {previous} of level {}",
        .level - 1
    )]
    NonMonotonicDimensions {
        level: usize,
        previous: usize,
        current: usize,
    },

    /// Per-level problem definitions do not match the number of levels.
    #[error("Expected {expected} problem definitions (one per level), got {actual}")]
    ProblemCountMismatch { expected: usize, actual: usize },

    /// A problem definition does not live in its level's space.
    #[error("Problem definition for level {level} has dimension {actual}, expected {expected}")]
    ProblemDimensionMismatch {
        level: usize,
        expected: usize,
        actual: usize,
    },

    /// A problem definition cannot be projected to a higher dimension.
    #[error("Cannot project a {from}-dimensional problem onto a {to}-dimensional space")]
    Projection { from: usize, to: usize },

    /// Stop level outside `0..levels`.
    #[error("Stop level {level} out of range for a hierarchy of {levels} levels")]
    StopLevelOutOfRange { level: usize, levels: usize },

    /// A planner was set up before a problem was bound to its level.
    #[error("No problem definition bound to level {level}")]
    MissingProblemDefinition { level: usize },

    /// Space bounds are malformed.
    #[error("Invalid bounds on axis {axis}: [{low}, {high}] is not a finite, non-empty interval")]
    InvalidBounds { axis: usize, low: f64, high: f64 },

    /// A problem's start state is not valid in its space.
    #[error("Start state of level {level} is invalid")]
    InvalidStart { level: usize },

    /// Named parameter error.
    #[error(transparent)]
    Param(#[from] ParamError),
}

/// Result type alias for PathForge operations
pub type Result<T> = std::result::Result<T, PathForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_monotonic_message_names_both_levels() {
        let err = PathForgeError::NonMonotonicDimensions {
            level: 2,
            previous: 4,
            current: 3,
        };
        assert_eq!(
            err.to_string(),
            "Level 2 has dimension 3, smaller than dimension 4 of level 1"
        );
    }

    #[test]
    fn test_param_error_is_transparent() {
        let err: PathForgeError = ParamError::UnknownParameter("foo".into()).into();
        assert_eq!(err.to_string(), "Unknown parameter 'foo'");
    }
}
