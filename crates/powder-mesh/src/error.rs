//! Error types for mesh analysis.

use thiserror::Error;

/// Result type for mesh analysis operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while analyzing an STL buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// Buffer too short to hold the 80-byte header and triangle count.
    #[error("buffer too short for STL header: got {got} bytes, need at least 84")]
    HeaderTooShort {
        /// Actual buffer length.
        got: usize,
    },

    /// Buffer shorter than the declared triangle count requires.
    #[error("truncated STL buffer: {triangles} triangles need {expected} bytes, got {got}")]
    Truncated {
        /// Declared triangle count.
        triangles: u32,
        /// Bytes required for the declared count.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },

    /// Declared triangle count exceeds the configured ceiling.
    #[error("triangle count {count} exceeds limit of {limit}")]
    TooManyTriangles {
        /// Declared triangle count.
        count: u32,
        /// Configured ceiling.
        limit: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MeshError::HeaderTooShort { got: 10 };
        assert!(format!("{err}").contains("84"));

        let err = MeshError::Truncated {
            triangles: 2,
            expected: 184,
            got: 100,
        };
        assert!(format!("{err}").contains("184"));

        let err = MeshError::TooManyTriangles {
            count: 10,
            limit: 5,
        };
        assert!(format!("{err}").contains("exceeds"));
    }
}
