//! Error types for eca_io crate.
//!
//! Provides structured error handling for reports and grid exports.

use eca_data::EcaError;
use thiserror::Error;

/// Main error type for eca_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed grid files and similar
    #[error("Validation error: {0}")]
    Validation(String),

    /// Engine or analyzer errors surfaced while producing output
    #[error("Core error: {0}")]
    Core(#[from] EcaError),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for eca_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a new serialization error.
    #[must_use]
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IoError::serialization("test error");
        assert_eq!(err.to_string(), "Serialization error: test error");
    }

    #[test]
    fn test_error_context() {
        let err = IoError::validation("bad header").with_context("reading grid.pbm");
        assert!(err.to_string().contains("reading grid.pbm"));
        assert!(err.to_string().contains("bad header"));
    }

    #[test]
    fn test_from_core_error() {
        let err: IoError = EcaError::InvalidRule { rule: 300 }.into();
        assert!(matches!(err, IoError::Core(EcaError::InvalidRule { rule: 300 })));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: IoError = io_err.into();
        assert!(matches!(err, IoError::FileSystem(_)));
    }
}
