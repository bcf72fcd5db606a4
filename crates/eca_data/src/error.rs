//! Error taxonomy for rule, row, grid and metric construction.

use thiserror::Error;

/// Errors raised by the engine and the analyzer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcaError {
    /// Rule number outside `0..=255`.
    #[error("Invalid rule {rule}: rule numbers must lie in 0..=255")]
    InvalidRule { rule: i64 },

    /// Non-positive generation count, empty row, zero lag and similar.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A lag leaves fewer than two overlapping samples.
    #[error("Insufficient data for lag {lag}: series length {len}")]
    InsufficientData { lag: usize, len: usize },

    /// Two rows or grids that must share a shape do not.
    #[error("Shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },
}

/// Result type alias for engine and analyzer operations.
pub type Result<T> = std::result::Result<T, EcaError>;

impl EcaError {
    /// Creates a new invalid-parameters error.
    #[must_use]
    pub fn invalid_parameters<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Creates a new shape-mismatch error.
    #[must_use]
    pub fn shape_mismatch<A: std::fmt::Display, B: std::fmt::Display>(expected: A, found: B) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Returns true for errors that only invalidate a single lag.
    #[must_use]
    pub fn is_localized(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EcaError::InvalidRule { rule: 256 };
        assert_eq!(
            err.to_string(),
            "Invalid rule 256: rule numbers must lie in 0..=255"
        );
    }

    #[test]
    fn test_invalid_parameters_message() {
        let err = EcaError::invalid_parameters("generations must be positive");
        assert!(err.to_string().contains("generations must be positive"));
        assert!(!err.is_localized());
    }

    #[test]
    fn test_insufficient_data_is_localized() {
        let err = EcaError::InsufficientData { lag: 9, len: 10 };
        assert!(err.is_localized());
        assert!(err.to_string().contains("lag 9"));
    }
}
