//! Branch-based task file discovery for taskfinder.
//!
//! Resolves which task file the CLI should operate on when the user does not
//! name one explicitly: the current git branch is substituted into a path
//! template, and candidate paths are probed with a two-tier fallback
//! (stripped branch prefix first, then the full branch name).
//!
//! The resolver is a pure function of its inputs: the template, a branch-name
//! source, and the filesystem. It does not read configuration; the caller
//! supplies the template.
//!
//! # Example
//!
//! ```rust,ignore
//! use taskfinder_discovery::resolve_task_file;
//!
//! let path = resolve_task_file("specs/{branch}/tasks.md")?;
//! println!("working on {}", path.display());
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod branch;
mod error;
mod resolve;

pub use branch::{current_branch, current_branch_in, validate_branch, GIT_TIMEOUT};
pub use error::DiscoveryError;
pub use resolve::{candidate_paths, resolve_in, resolve_task_file, BRANCH_PLACEHOLDER};
