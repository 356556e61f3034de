//! Local branch operations (check existence, read upstream, create tracking branch).

use crate::error::{MirrorError, Result};
use crate::git::{run_git, run_git_unchecked};
use crate::refs::RemoteRef;
use std::path::Path;

/// Check if a branch exists locally.
///
/// Uses `git show-ref --verify --quiet refs/heads/<branch>`: exit status 0
/// means the branch exists, anything else means it does not.
///
/// # Arguments
///
/// * `repo` - Path to the repository
/// * `branch` - Name of the branch to check
pub fn branch_exists<P: AsRef<Path>>(repo: P, branch: &str) -> Result<bool> {
    let run = run_git_unchecked(
        repo,
        &[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/heads/{}", branch),
        ],
    )?;
    Ok(run.success)
}

/// Full name of the ref a local branch tracks, e.g. `refs/remotes/origin/main`.
///
/// Returns `Ok(None)` if the branch has no upstream configured.
pub fn upstream_of<P: AsRef<Path>>(repo: P, branch: &str) -> Result<Option<String>> {
    let output = run_git(
        repo,
        &[
            "for-each-ref",
            "--format=%(upstream)",
            &format!("refs/heads/{}", branch),
        ],
    )?;

    Ok(output.lines().first().map(|s| s.to_string()))
}

/// Create a local branch that tracks a remote-tracking branch.
///
/// Runs `git branch --track <name> refs/remotes/<remote>/<branch>`. The
/// full ref name keeps the start point unambiguous if a tag or local branch
/// happens to be called `<remote>/<branch>`.
///
/// # Returns
///
/// * `Ok(())` - Branch created
/// * `Err(MirrorError::Git)` - git refused (invalid name, branch exists, ...)
pub fn create_tracking_branch<P: AsRef<Path>>(
    repo: P,
    name: &str,
    remote_ref: &RemoteRef,
) -> Result<()> {
    let start_point = remote_ref.full_name();
    run_git(repo, &["branch", "--track", name, &start_point]).map_err(|e| {
        MirrorError::Git(format!(
            "failed to create branch '{}' tracking '{}': {}",
            name, remote_ref, e
        ))
    })?;
    Ok(())
}
