//! Template substitution and candidate path probing.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::branch::{current_branch, validate_branch};
use crate::error::DiscoveryError;

/// Placeholder token recognized in path templates.
///
/// Substitution is a literal string replace, not a templating engine.
pub const BRANCH_PLACEHOLDER: &str = "{branch}";

/// Build the ordered candidate paths for a template and branch name.
///
/// A branch with a `/` yields two candidates: the stripped form first
/// (everything after the first `/`), then the full branch name. A
/// single-segment branch yields one candidate.
///
/// Branch-naming conventions commonly prefix a category folder
/// (`feature/x`, `specs/x`); stripping the first segment lets a template
/// like `specs/{branch}/tasks.md` map `specs/my-feature` to
/// `specs/my-feature/tasks.md` instead of doubling the prefix.
#[must_use]
pub fn candidate_paths(template: &str, branch: &str) -> Vec<String> {
    match branch.split_once('/') {
        Some((_, stripped)) => vec![
            template.replace(BRANCH_PLACEHOLDER, stripped),
            template.replace(BRANCH_PLACEHOLDER, branch),
        ],
        None => vec![template.replace(BRANCH_PLACEHOLDER, branch)],
    }
}

/// Resolve the task file for the current branch.
///
/// Candidate paths are probed relative to the current working directory.
///
/// # Arguments
///
/// * `template` - Path pattern containing the literal `{branch}` placeholder
///
/// # Errors
///
/// * If the branch lookup fails or times out
/// * If the branch name is invalid or marks a special git state
/// * If no candidate path exists on disk
pub fn resolve_task_file(template: &str) -> Result<PathBuf, DiscoveryError> {
    resolve_in(Path::new("."), template, current_branch)
}

/// Resolve the task file using an injected branch-name source.
///
/// The deterministic core of [`resolve_task_file`]: candidate paths are
/// probed relative to `base`, and the branch name comes from
/// `branch_source` instead of a hard-coded git call. The returned path is
/// the substituted template, relative to `base`.
///
/// # Errors
///
/// * If `branch_source` fails
/// * If the branch name is invalid or marks a special git state
/// * If no candidate path exists on disk (the error lists every tried path)
pub fn resolve_in<F>(
    base: &Path,
    template: &str,
    branch_source: F,
) -> Result<PathBuf, DiscoveryError>
where
    F: FnOnce() -> Result<String, DiscoveryError>,
{
    let branch = branch_source()?;
    validate_branch(&branch)?;

    let candidates = candidate_paths(template, &branch);
    log::debug!("Probing {} candidate path(s) for branch {branch}", candidates.len());

    for candidate in &candidates {
        let path = base.join(candidate);
        if path.is_file() {
            log::debug!("Resolved task file: {candidate}");
            return Ok(PathBuf::from(candidate));
        }
    }

    Err(DiscoveryError::FileNotFound { tried: candidates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &str = "specs/{branch}/tasks.md";

    fn branch(name: &str) -> impl FnOnce() -> Result<String, DiscoveryError> {
        let name = name.to_string();
        move || Ok(name)
    }

    fn create_file(base: &Path, relative: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "- [ ] task\n").unwrap();
    }

    #[test]
    fn test_candidate_paths_two_tier() {
        let candidates = candidate_paths(TEMPLATE, "specs/my-feature");

        assert_eq!(
            candidates,
            vec!["specs/my-feature/tasks.md", "specs/specs/my-feature/tasks.md"]
        );
    }

    #[test]
    fn test_candidate_paths_single_segment() {
        let candidates = candidate_paths(TEMPLATE, "main");

        assert_eq!(candidates, vec!["specs/main/tasks.md"]);
    }

    #[test]
    fn test_candidate_paths_strips_first_segment_only() {
        let candidates = candidate_paths(TEMPLATE, "feature/auth/v2");

        assert_eq!(
            candidates,
            vec!["specs/auth/v2/tasks.md", "specs/feature/auth/v2/tasks.md"]
        );
    }

    #[test]
    fn test_resolve_stripped_form() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "specs/my-feature/tasks.md");

        let path = resolve_in(dir.path(), TEMPLATE, branch("specs/my-feature")).unwrap();

        assert_eq!(path, PathBuf::from("specs/my-feature/tasks.md"));
    }

    #[test]
    fn test_resolve_stripped_form_wins_over_full() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "specs/my-feature/tasks.md");
        create_file(dir.path(), "specs/specs/my-feature/tasks.md");

        let path = resolve_in(dir.path(), TEMPLATE, branch("specs/my-feature")).unwrap();

        assert_eq!(path, PathBuf::from("specs/my-feature/tasks.md"));
    }

    #[test]
    fn test_resolve_falls_back_to_full_form() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "specs/feature/auth/tasks.md");

        let path = resolve_in(dir.path(), TEMPLATE, branch("feature/auth")).unwrap();

        assert_eq!(path, PathBuf::from("specs/feature/auth/tasks.md"));
    }

    #[test]
    fn test_resolve_single_segment_not_found() {
        let dir = TempDir::new().unwrap();

        let err = resolve_in(dir.path(), TEMPLATE, branch("main")).unwrap_err();

        assert!(err.to_string().contains("tried: specs/main/tasks.md"));
    }

    #[test]
    fn test_resolve_not_found_lists_all_candidates_in_order() {
        let dir = TempDir::new().unwrap();

        let err =
            resolve_in(dir.path(), TEMPLATE, branch("feature/nonexistent")).unwrap_err();

        assert!(err.to_string().contains(
            "tried: specs/nonexistent/tasks.md, specs/feature/nonexistent/tasks.md"
        ));
    }

    #[test]
    fn test_resolve_skips_directories() {
        let dir = TempDir::new().unwrap();
        // The stripped candidate exists but is a directory, not a file.
        fs::create_dir_all(dir.path().join("specs/my-feature/tasks.md")).unwrap();
        create_file(dir.path(), "specs/specs/my-feature/tasks.md");

        let path = resolve_in(dir.path(), TEMPLATE, branch("specs/my-feature")).unwrap();

        assert_eq!(path, PathBuf::from("specs/specs/my-feature/tasks.md"));
    }

    #[test]
    fn test_resolve_rejects_special_states_without_probing() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "specs/HEAD/tasks.md");

        for name in ["HEAD", "(no branch)", "rebase-apply", "merge-conflict"] {
            let err = resolve_in(dir.path(), TEMPLATE, branch(name)).unwrap_err();
            assert!(
                matches!(err, DiscoveryError::SpecialGitState { .. }),
                "expected rejection for {name:?}"
            );
        }
    }

    #[test]
    fn test_resolve_rejects_injection_attempts() {
        let dir = TempDir::new().unwrap();

        let err = resolve_in(dir.path(), TEMPLATE, branch("x;rm -rf /")).unwrap_err();

        assert!(matches!(err, DiscoveryError::InvalidBranchName));
        assert!(!err.to_string().contains("rm -rf"));
    }

    #[test]
    fn test_resolve_propagates_branch_lookup_failure() {
        let dir = TempDir::new().unwrap();

        let err = resolve_in(dir.path(), TEMPLATE, || {
            Err(DiscoveryError::BranchLookupError {
                message: "boom".to_string(),
            })
        })
        .unwrap_err();

        assert!(matches!(err, DiscoveryError::BranchLookupError { .. }));
    }
}
