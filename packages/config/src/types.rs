//! Configuration types for taskfinder.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};

/// Default path template used when the config file omits or empties `template`.
pub const DEFAULT_TEMPLATE: &str = "specs/{branch}/tasks.md";

/// Taskfinder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Branch-based task file discovery settings.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Settings controlling branch-based task file discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryConfig {
    /// Whether branch-based discovery is attempted at all.
    #[serde(default)]
    pub enabled: bool,

    /// Path pattern containing the literal `{branch}` placeholder.
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            template: default_template(),
        }
    }
}

impl DiscoveryConfig {
    /// Replace an empty template with the default.
    ///
    /// The loader guarantees `template` is never empty after loading; an
    /// empty string in the source file counts as absent.
    pub fn fill_defaults(&mut self) {
        if self.template.is_empty() {
            self.template = default_template();
        }
    }
}
