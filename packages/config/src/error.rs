//! Error types for configuration loading.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading.
///
/// The loader memoizes its result process-wide, so every variant is `Clone`;
/// underlying errors are rendered to strings rather than carried as sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    ///
    /// The memoized loader treats this as "candidate not found" and moves on
    /// to the next location; it only surfaces from the single-file API.
    #[error("Failed to read config file {}: {message}", path.display())]
    ReadError {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// Rendered IO error.
        message: String,
    },

    /// A config file was found and read but is not valid YAML.
    ///
    /// Fatal to the whole load: a malformed file is never skipped in favor of
    /// a lower-precedence candidate.
    #[error("Failed to parse config file {}: {message}", path.display())]
    ParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// Rendered YAML parse error.
        message: String,
    },
}
