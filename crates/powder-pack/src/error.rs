//! Error types for packing operations.

use thiserror::Error;

/// Result type for packing operations.
pub type PackResult<T> = Result<T, PackError>;

/// Errors that can occur during packing.
///
/// Per-item placement failures are not errors: the batch packer collects
/// them into its `unpacked` list and keeps going, so one impossible item
/// never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// Nonpositive or non-finite input value.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PackError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::InvalidInput(details.into())
    }
}
