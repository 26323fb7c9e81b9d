//! Error types for sigmalint operations.
//!
//! This module defines [`LintError`], the error type for everything that can
//! go wrong *around* validation, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Lint findings are never errors: validators return [`Issue`] values
//! - `LintError` covers configuration and construction failures that must
//!   abort before any rule is checked
//! - Use `anyhow::Error` (via `LintError::Other`) for unexpected errors
//!
//! [`Issue`]: crate::lint::Issue

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sigmalint operations.
#[derive(Debug, Error)]
pub enum LintError {
    /// Validator configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse validator configuration.
    #[error("Failed to parse validator config: {message}")]
    ConfigParseError { message: String },

    /// A validator name that is not registered.
    #[error("Unknown validator '{name}'")]
    UnknownValidator { name: String },

    /// Attempt to deselect a validator that is not currently selected.
    #[error("Attempting to remove validator '{name}' which is not in the validator set")]
    RemoveUnknownValidator { name: String },

    /// Taxonomy data is missing or unusable.
    #[error("Invalid taxonomy data: {message}")]
    Taxonomy { message: String },

    /// A rule tag without a namespace separator.
    #[error("Invalid tag '{tag}': expected '<namespace>.<name>'")]
    InvalidTag { tag: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for sigmalint operations.
pub type Result<T> = std::result::Result<T, LintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = LintError::ConfigNotFound {
            path: PathBuf::from("/etc/sigmalint.yml"),
        };
        assert!(err.to_string().contains("/etc/sigmalint.yml"));
    }

    #[test]
    fn config_parse_error_displays_message() {
        let err = LintError::ConfigParseError {
            message: "invalid syntax".into(),
        };
        assert!(err.to_string().contains("invalid syntax"));
    }

    #[test]
    fn unknown_validator_displays_name() {
        let err = LintError::UnknownValidator {
            name: "nonexistent".into(),
        };
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn remove_unknown_validator_displays_name() {
        let err = LintError::RemoveUnknownValidator {
            name: "dangling_detection".into(),
        };
        assert!(err.to_string().contains("dangling_detection"));
    }

    #[test]
    fn taxonomy_error_displays_message() {
        let err = LintError::Taxonomy {
            message: "no tactics".into(),
        };
        assert!(err.to_string().contains("no tactics"));
    }

    #[test]
    fn invalid_tag_displays_tag() {
        let err = LintError::InvalidTag {
            tag: "attack".into(),
        };
        assert!(err.to_string().contains("'attack'"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LintError = io_err.into();
        assert!(matches!(err, LintError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(LintError::UnknownValidator {
                name: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
