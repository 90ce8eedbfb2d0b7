//! Error types for SAX encoding and symbolic matching.

use thiserror::Error;

/// Errors raised by the encoder, the matcher and their building blocks.
///
/// A series that is too short to hold a single window is not an error: the
/// encoder returns an empty sequence and the matcher an empty match list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaxError {
    #[error("Invalid configuration: {name} - {reason}")]
    InvalidConfiguration { name: &'static str, reason: String },

    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Data source error: {0}")]
    Source(String),
}

impl SaxError {
    pub(crate) fn config(name: &'static str, reason: impl Into<String>) -> Self {
        SaxError::InvalidConfiguration {
            name,
            reason: reason.into(),
        }
    }

    /// Whether this error reports mutually inconsistent parameters.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, SaxError::InvalidConfiguration { .. })
    }
}

/// Result type alias for SAX operations.
pub type Result<T> = std::result::Result<T, SaxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_configuration() {
        let err = SaxError::config("n_bins", "must be >= 2, got 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: n_bins - must be >= 2, got 1"
        );
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_display_insufficient_data() {
        let err = SaxError::InsufficientData {
            required: 1,
            got: 0,
        };
        assert_eq!(err.to_string(), "Insufficient data: required 1, got 0");
        assert!(!err.is_invalid_configuration());
    }
}
