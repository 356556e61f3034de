//! Git command runner for branch-mirror.
//!
//! Provides a wrapper around git commands with captured stdout/stderr and
//! structured error handling. All git operations go through this module.

use crate::error::{MirrorError, Result};
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Captured output of a git command.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns stdout lines, trimmed, with blank lines dropped.
    pub fn lines(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// The most useful text to show when the command failed.
    pub fn error_message(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// A git invocation that ran to completion, successfully or not.
#[derive(Debug, Clone)]
pub struct GitRun {
    /// Whether git exited with status 0.
    pub success: bool,
    /// Git's exit status, `None` if it was terminated by a signal.
    pub code: Option<i32>,
    pub output: GitOutput,
}

/// Run a git command and report its exit status without treating a
/// non-zero status as an error.
///
/// Only a failure to spawn git at all is an error here. Use this for
/// commands whose exit status is itself the answer (`show-ref --verify`)
/// or whose status must be propagated (`clone`).
pub fn run_git_unchecked<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitRun> {
    let cwd = cwd.as_ref();
    debug!(cwd = %cwd.display(), "git {}", args.join(" "));

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            MirrorError::Git(format!(
                "failed to execute git {}: {} (is git installed?)",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let run = GitRun {
        success: output.status.success(),
        code: output.status.code(),
        output: GitOutput::from_output(&output),
    };
    debug!(success = run.success, code = ?run.code, "git {} finished", args.first().unwrap_or(&""));
    Ok(run)
}

/// Run a git command with the specified working directory.
///
/// # Arguments
///
/// * `cwd` - The working directory to run the command in
/// * `args` - The git command arguments (without "git" prefix)
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(MirrorError::Git)` - On non-zero exit code
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let run = run_git_unchecked(cwd, args)?;

    if run.success {
        Ok(run.output)
    } else {
        Err(MirrorError::Git(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            run.code.unwrap_or(-1),
            run.output.error_message()
        )))
    }
}

/// List the names of the remotes configured in a repository.
pub fn list_remotes<P: AsRef<Path>>(repo: P) -> Result<Vec<String>> {
    let output = run_git(repo, &["remote"])?;
    Ok(output.lines().into_iter().map(str::to_string).collect())
}
