//! Configuration loading for taskfinder.
//!
//! This crate locates and parses the taskfinder configuration file, applies
//! field defaults, and memoizes the result for the lifetime of the process.
//!
//! # Candidate Locations
//!
//! Checked in precedence order; the first readable file wins in full (there
//! is no merging across sources):
//!
//! * `./.taskfinder.yml` - current working directory
//! * `~/.config/taskfinder/config.yml` - user config directory
//!
//! If neither exists, the built-in default configuration is returned
//! (discovery disabled, default template).
//!
//! # Example
//!
//! ```rust,ignore
//! let config = taskfinder_config::load()?;
//! if config.discovery.enabled {
//!     println!("template: {}", config.discovery.template);
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod types;
mod yaml_loader;

pub use error::ConfigError;
pub use types::{Config, DiscoveryConfig, DEFAULT_TEMPLATE};
pub use yaml_loader::load_yaml_config;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Config file name looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = ".taskfinder.yml";

/// Config file path relative to the home directory.
pub const USER_CONFIG_FILE: &str = ".config/taskfinder/config.yml";

/// Memoized load result shared by every caller in the process.
///
/// Guarded lazy initialization: the mutex serializes concurrent first-time
/// loads so the file read and parse happen exactly once.
static CACHE: Mutex<Option<Result<Config, ConfigError>>> = Mutex::new(None);

/// Load the taskfinder configuration, memoized process-wide.
///
/// The first call reads and parses the config file (see crate docs for the
/// candidate locations); every later call returns the memoized result
/// without touching the filesystem, including memoized errors.
///
/// # Errors
///
/// * If a candidate file was found but cannot be parsed as YAML
pub fn load() -> Result<Config, ConfigError> {
    let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(result) = cache.as_ref() {
        return result.clone();
    }

    let result = load_from_paths(&default_candidate_paths());
    *cache = Some(result.clone());
    result
}

/// Clear the memoized load result.
///
/// Test support: the next [`load`] call re-reads the filesystem. Production
/// code has no reason to call this.
pub fn reset_cache() {
    let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    *cache = None;
}

/// Build the ordered candidate list from explicit directories.
///
/// `cwd` contributes `.taskfinder.yml`, `home` contributes
/// `.config/taskfinder/config.yml`. A `None` directory silently drops its
/// candidate rather than erroring.
#[must_use]
pub fn candidate_paths(cwd: Option<&Path>, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);

    if let Some(cwd) = cwd {
        candidates.push(cwd.join(LOCAL_CONFIG_FILE));
    }
    if let Some(home) = home {
        candidates.push(home.join(USER_CONFIG_FILE));
    }

    candidates
}

fn default_candidate_paths() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let home = dirs::home_dir();
    candidate_paths(cwd.as_deref(), home.as_deref())
}

/// Load configuration from an ordered list of candidate paths.
///
/// Unreadable candidates (missing file, permission error) are skipped; a
/// candidate that reads but fails to parse stops the whole load. If no
/// candidate is readable, the built-in default configuration is returned.
///
/// # Errors
///
/// * If a candidate file was read but cannot be parsed as YAML
pub fn load_from_paths(candidates: &[PathBuf]) -> Result<Config, ConfigError> {
    for path in candidates {
        match load_yaml_config(path) {
            Ok(config) => return Ok(config),
            Err(ConfigError::ReadError { .. }) => {
                log::debug!("No config at {}, trying next candidate", path.display());
            }
            Err(err) => return Err(err),
        }
    }

    log::debug!("No config file found, using built-in defaults");
    Ok(Config::default())
}
