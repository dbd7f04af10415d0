//! Error types for the extractor.
//!
//! Only failures that skip an input (or stop the CLI before any input is
//! touched) are errors. A missing title, a missing date or an amendment
//! without a link target are valid outcomes and are modelled elsewhere.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// The input could not be opened or its text could not be extracted.
    #[error("Cannot read input {}: {reason}", .path.display())]
    InputUnreadable { path: PathBuf, reason: String },

    /// A store write or read failed; the current document is rolled back.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// A store rejected a write or a transaction call outside the backend
    /// driver (missing referenced document, unbalanced transaction).
    #[error("Store constraint violated: {0}")]
    Constraint(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    /// Configuration parsed but holds values outside their valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Report serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractorError {
    /// Build an `InputUnreadable` error from any displayable cause.
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::InputUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_unreadable_display() {
        let err = ExtractorError::unreadable("/tmp/broken.pdf", "invalid file header");
        assert_eq!(
            err.to_string(),
            "Cannot read input /tmp/broken.pdf: invalid file header"
        );
    }

    #[test]
    fn test_invalid_config_display() {
        let err = ExtractorError::InvalidConfig("uppercase_ratio must be within 0..=1".to_string());
        assert!(err.to_string().starts_with("Invalid configuration"));
        assert!(err.to_string().contains("uppercase_ratio"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ExtractorError = io.into();
        assert!(matches!(err, ExtractorError::Io(_)));
    }
}
