//! Error types for the knowledge base engine.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! This ensures composable error handling across crates.
//!
//! Dangling wiki-links are deliberately absent from this taxonomy: a link to a
//! title that no note carries is an ordinary forward reference and is reported
//! by the link graph, never raised.

use std::io;
use thiserror::Error as ThisError;

/// The core error type for all engine operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O error (snapshot or config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Referenced note (or version) does not exist
    #[error("Not found: {key}")]
    NotFound { key: String },

    /// Two notes in one collection share an id
    #[error("Duplicate note id: {id}")]
    DuplicateId { id: String },

    /// Snapshot was written by an incompatible schema
    #[error("Incompatible snapshot schema version {found} (expected {expected})")]
    IncompatibleSnapshot { found: u32, expected: u32 },

    /// Parse error
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Validation error
    #[error("Validation error: {reason}")]
    ValidationError { reason: String },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a not found error
    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound { key: key.into() }
    }

    /// Create a duplicate id error
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Error::DuplicateId { id: id.into() }
    }

    /// Create an incompatible snapshot error
    pub fn incompatible_snapshot(found: u32, expected: u32) -> Self {
        Error::IncompatibleSnapshot { found, expected }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation_error(reason: impl Into<String>) -> Self {
        Error::ValidationError {
            reason: reason.into(),
        }
    }

    /// True for [`Error::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::not_found("note-1");
        assert!(err.to_string().contains("Not found"));
        assert!(err.is_not_found());

        let err = Error::incompatible_snapshot(7, 1);
        assert_eq!(
            err.to_string(),
            "Incompatible snapshot schema version 7 (expected 1)"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
