//! Error types for the gridline engine.
//!
//! The constraint solver never fails: infeasible maximum constraints are
//! dropped and reported through the solver's report instead. The errors here
//! cover malformed input handed to the public API.

use thiserror::Error;

/// Top-level error type for the gridline engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Errors while building cell specs or axis settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("Cell index must not be negative, got {start}")]
    NegativeStart { start: i32 },

    #[error("Cell span must not be negative, got {size}")]
    NegativeSize { size: i32 },

    #[error("Explicit axis count must not be negative, got {count}")]
    NegativeCount { count: i32 },
}

/// Errors while manipulating a grid container.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Child index {index} out of range for a grid with {len} children")]
    ChildOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: GridError = SpecError::NegativeSize { size: -2 }.into();
        assert_eq!(err.to_string(), "Cell span must not be negative, got -2");

        let err: GridError = LayoutError::ChildOutOfRange { index: 4, len: 2 }.into();
        assert_eq!(
            err.to_string(),
            "Child index 4 out of range for a grid with 2 children"
        );
    }
}
