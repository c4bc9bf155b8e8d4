//! Error types for RideFare
//!
//! Every failure is local and synchronous: a calculation either returns a
//! complete value or one of these errors, never a partial result.

use thiserror::Error;

/// Result type alias using FareError
pub type Result<T> = std::result::Result<T, FareError>;

/// Unified error type for fare operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FareError {
    /// Malformed or out-of-range trip/split input
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Per-unit value requested for a zero denominator
    #[error("Division by zero: `{field}` is zero")]
    DivisionByZero { field: &'static str },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fare calculation overflow")]
    Overflow,
}

impl FareError {
    /// Shorthand for an [`FareError::InvalidInput`] on `field`
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        FareError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if the error concerns one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FareError::InvalidInput { field, .. } | FareError::DivisionByZero { field } => {
                Some(field)
            }
            _ => None,
        }
    }
}
