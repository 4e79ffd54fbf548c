//! Current-branch lookup and branch name validation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::DiscoveryError;

/// Deadline for the git branch lookup.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Characters that must never appear in a branch name.
///
/// The branch name participates in path construction and must never be
/// interpretable by a shell. Deny-list applied to the raw retrieved string,
/// independent of how the name was obtained.
const FORBIDDEN_CHARS: &[char] = &[';', '&', '|', '<', '>', '$', '`', '"', '\'', '\\'];

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Get the current branch name from the working directory's repository.
///
/// Runs `git rev-parse --abbrev-ref HEAD` with a 5 second deadline; trimmed
/// stdout is the branch name.
///
/// # Errors
///
/// * If the command cannot be spawned, exits non-zero, or prints nothing
/// * If the command exceeds its deadline (the child is killed)
pub fn current_branch() -> Result<String, DiscoveryError> {
    branch_from_git(None)
}

/// Get the current branch name for the repository at `dir`.
///
/// Same contract as [`current_branch`], with an explicit working directory.
///
/// # Errors
///
/// * If the command cannot be spawned, exits non-zero, or prints nothing
/// * If the command exceeds its deadline (the child is killed)
pub fn current_branch_in(dir: &Path) -> Result<String, DiscoveryError> {
    branch_from_git(Some(dir))
}

fn branch_from_git(dir: Option<&Path>) -> Result<String, DiscoveryError> {
    log::debug!("Querying current branch via git rev-parse");

    let mut command = Command::new("git");
    command
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    let mut child = command.spawn().map_err(|e| DiscoveryError::BranchLookupError {
        message: format!("failed to run git: {e}"),
    })?;

    let deadline = Instant::now() + GIT_TIMEOUT;
    let status = loop {
        let polled = child.try_wait().map_err(|e| DiscoveryError::BranchLookupError {
            message: format!("failed to wait for git: {e}"),
        })?;
        if let Some(status) = polled {
            break status;
        }
        if Instant::now() >= deadline {
            log::debug!("git rev-parse exceeded {}s, killing", GIT_TIMEOUT.as_secs());
            let _ = child.kill();
            let _ = child.wait();
            return Err(DiscoveryError::CommandTimeout {
                seconds: GIT_TIMEOUT.as_secs(),
            });
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    let output = child
        .wait_with_output()
        .map_err(|e| DiscoveryError::BranchLookupError {
            message: format!("failed to read git output: {e}"),
        })?;

    if !status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DiscoveryError::BranchLookupError {
            message: format!("git rev-parse failed: {}", stderr.trim()),
        });
    }

    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if branch.is_empty() {
        return Err(DiscoveryError::BranchLookupError {
            message: "git rev-parse returned an empty branch name".to_string(),
        });
    }

    log::debug!("Current branch: {branch}");
    Ok(branch)
}

/// Validate a branch name before it participates in path construction.
///
/// Rejects shell metacharacters and the special repository states (detached
/// HEAD, in-progress rebase or merge) where "current branch" is unreliable.
///
/// # Errors
///
/// * If the name contains any of `` ; & | < > $ ` " ' \ ``
/// * If the name marks a special git state
pub fn validate_branch(branch: &str) -> Result<(), DiscoveryError> {
    if branch.contains(FORBIDDEN_CHARS) {
        return Err(DiscoveryError::InvalidBranchName);
    }

    if branch == "HEAD" || branch == "(no branch)" {
        return Err(DiscoveryError::SpecialGitState {
            state: "detached HEAD".to_string(),
        });
    }
    if branch.contains("rebase") {
        return Err(DiscoveryError::SpecialGitState {
            state: "rebase in progress".to_string(),
        });
    }
    if branch.contains("merge") {
        return Err(DiscoveryError::SpecialGitState {
            state: "merge in progress".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo(branch: &str) -> TempDir {
        let dir = TempDir::new().unwrap();

        Command::new("git")
            .args(["init", "-b", branch])
            .current_dir(dir.path())
            .output()
            .unwrap();

        // `git rev-parse --abbrev-ref HEAD` needs at least one commit.
        Command::new("git")
            .args([
                "-c",
                "user.email=test@example.com",
                "-c",
                "user.name=test",
                "commit",
                "--allow-empty",
                "-m",
                "init",
            ])
            .current_dir(dir.path())
            .output()
            .unwrap();

        dir
    }

    #[test]
    fn test_current_branch_in_repo() {
        let dir = create_test_repo("feature/test-branch");

        let branch = current_branch_in(dir.path()).unwrap();

        assert_eq!(branch, "feature/test-branch");
    }

    #[test]
    fn test_current_branch_outside_repo() {
        let dir = TempDir::new().unwrap();

        let err = current_branch_in(dir.path()).unwrap_err();

        assert!(matches!(err, DiscoveryError::BranchLookupError { .. }));
    }

    #[test]
    fn test_validate_branch_accepts_normal_names() {
        validate_branch("main").unwrap();
        validate_branch("feature/auth").unwrap();
        validate_branch("specs/my-feature").unwrap();
    }

    #[test]
    fn test_validate_branch_rejects_forbidden_characters() {
        for c in [';', '&', '|', '<', '>', '$', '`', '"', '\'', '\\'] {
            let branch = format!("feat{c}ure");
            let err = validate_branch(&branch).unwrap_err();
            assert!(
                matches!(err, DiscoveryError::InvalidBranchName),
                "expected rejection for {c:?}"
            );
        }
    }

    #[test]
    fn test_validate_branch_rejects_special_states() {
        for branch in ["HEAD", "(no branch)", "rebase-apply", "my-merge-branch"] {
            let err = validate_branch(branch).unwrap_err();
            assert!(
                matches!(err, DiscoveryError::SpecialGitState { .. }),
                "expected rejection for {branch:?}"
            );
        }
    }

    #[test]
    fn test_validate_branch_error_omits_raw_name() {
        let err = validate_branch("evil;rm -rf").unwrap_err();
        assert!(!err.to_string().contains("evil"));
    }
}
