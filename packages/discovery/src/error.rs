//! Error types for task file discovery.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error;

/// Errors that can occur while resolving a task file from the current branch.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The git branch lookup failed or produced an unusable name.
    #[error("Failed to determine current branch: {message}")]
    BranchLookupError {
        /// Underlying cause (spawn failure, non-zero exit with stderr, empty
        /// output).
        message: String,
    },

    /// The git branch lookup exceeded its deadline.
    #[error("git branch lookup timed out after {seconds}s")]
    CommandTimeout {
        /// The enforced deadline, in seconds.
        seconds: u64,
    },

    /// The branch name contains shell metacharacters.
    ///
    /// The raw name is deliberately not echoed back.
    #[error("Invalid characters in branch name; specify the task file explicitly")]
    InvalidBranchName,

    /// The repository is in a state where "current branch" is unreliable.
    #[error("Branch is in a special git state ({state}); specify the task file explicitly")]
    SpecialGitState {
        /// Human-readable description of the state.
        state: String,
    },

    /// No candidate path existed on disk.
    #[error("No task file found; tried: {}", tried.join(", "))]
    FileNotFound {
        /// Every candidate path that was probed, in order.
        tried: Vec<String>,
    },
}
