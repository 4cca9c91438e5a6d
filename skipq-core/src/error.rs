//! Error types for skip list operations and configuration.

use thiserror::Error;

// ============================================================================
// CollectionError - Failures reported by the collection protocol surface
// ============================================================================

/// Errors reported by collection operations.
///
/// Every variant is raised by a precondition check that runs before any
/// mutation starts, so an `Err` always leaves the list untouched.
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CollectionError {
    #[error("offset {offset} is outside a destination of length {len}")]
    InvalidArgument { offset: usize, len: usize },

    #[error("destination has room for {available} elements but {required} are required")]
    InsufficientCapacity { required: usize, available: usize },

    #[error("operation not supported: {0}")]
    Unsupported(&'static str),

    #[error("collection is empty")]
    Empty,

    #[error("collection is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
}

// ============================================================================
// ConfigError - Rejected configuration values
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max height must be within 1..={max}, got {got}")]
    MaxHeightOutOfRange { got: usize, max: usize },

    #[error("capacity must be greater than zero")]
    ZeroCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_details() {
        let err = CollectionError::InsufficientCapacity {
            required: 4,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "destination has room for 2 elements but 4 are required"
        );

        let err = CollectionError::Unsupported("add on a read-only view");
        assert_eq!(
            err.to_string(),
            "operation not supported: add on a read-only view"
        );

        let err = ConfigError::MaxHeightOutOfRange { got: 40, max: 32 };
        assert_eq!(err.to_string(), "max height must be within 1..=32, got 40");
    }
}
