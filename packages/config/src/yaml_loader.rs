//! YAML configuration file loader.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::Config;

/// Load a YAML configuration file.
///
/// Missing fields are filled with defaults, so the returned config always
/// carries a non-empty discovery template.
///
/// # Arguments
///
/// * `path` - Path to the YAML configuration file
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed as YAML
pub fn load_yaml_config(path: &Path) -> Result<Config, ConfigError> {
    log::debug!("Loading YAML config from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_config(path, &content)
}

/// Parse YAML text into a [`Config`], applying field defaults.
fn parse_config(path: &Path, content: &str) -> Result<Config, ConfigError> {
    let mut config: Config =
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    config.discovery.fill_defaults();

    log::debug!(
        "Loaded config: discovery enabled={}, template={:?}",
        config.discovery.enabled,
        config.discovery.template
    );

    Ok(config)
}
