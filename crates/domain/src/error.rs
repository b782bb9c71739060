//! Domain error types.

use thiserror::Error;

/// Errors raised while validating catalog input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A rating score outside the 0..=5 range.
    #[error("Invalid score: {score} (must be between 0 and 5)")]
    InvalidScore { score: i64 },

    /// A required text field was blank.
    #[error("Field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}
