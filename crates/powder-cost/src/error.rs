//! Error types for cost estimation.

use thiserror::Error;

/// Result type for cost estimation.
pub type CostResult<T> = Result<T, CostError>;

/// Errors that can occur during cost estimation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostError {
    /// Nonpositive or non-finite input value.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CostError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::InvalidInput(details.into())
    }
}
