//! Configuration file loading.

use std::fs;
use std::path::Path;

use crate::config::schema::ValidatorConfig;
use crate::error::{LintError, Result};

/// Load a validator config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ValidatorConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LintError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LintError::Io(e)
        }
    })?;

    tracing::debug!(path = %path.display(), "loaded validator config");
    parse_config(&content)
}

/// Parse YAML content into a [`ValidatorConfig`].
pub fn parse_config(content: &str) -> Result<ValidatorConfig> {
    serde_yaml::from_str(content).map_err(|e| LintError::ConfigParseError {
        message: e.to_string(),
    })
}

impl ValidatorConfig {
    /// Parse a config from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Load a config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        load_config_file(path)
    }
}
