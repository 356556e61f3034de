//! The clone-and-mirror workflow.
//!
//! A strictly linear sequence of fallible steps. The first failure aborts
//! the run; whatever was already created on disk is left as-is.
//!
//! 1. Derive the clone directory name from the repository location
//! 2. `git clone` into that directory (which must not exist yet)
//! 3. Enter the directory; all later git commands run inside it
//! 4. `git fetch --all`
//! 5. List remote-tracking branches, skipping symbolic refs
//! 6. Create a local tracking branch for each one that has no local branch
//!    of the same name yet

mod report;


pub use report::{MirrorReport, SkipReason};

use crate::branch::{branch_exists, create_tracking_branch, upstream_of};
use crate::cli::Cli;
use crate::config::Config;
use crate::error::{MirrorError, Result};
use crate::git::run_git_unchecked;
use crate::location::{derive_directory_name, validate_directory_name};
use crate::refs::list_remote_branches;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything a mirror run needs besides the parent directory.
#[derive(Debug, Clone)]
pub struct MirrorOptions {
    /// Repository location passed to `git clone`.
    pub location: String,
    /// Clone directory name; derived from `location` when `None`.
    pub directory: Option<String>,
    pub config: Config,
}

impl MirrorOptions {
    /// Build options from parsed arguments, loading the config file if given.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load_optional(cli.config.as_ref())?
            .with_overrides(cli.remote.clone(), cli.prune)?;

        Ok(Self {
            location: cli.repo_url.clone(),
            directory: cli.directory.clone(),
            config,
        })
    }

    /// The name of the directory the clone lands in.
    pub fn directory_name(&self) -> Result<String> {
        match &self.directory {
            Some(name) => validate_directory_name(name),
            None => derive_directory_name(&self.location),
        }
    }
}

/// Execute the mirror workflow from the process working directory.
pub fn cmd_mirror(cli: &Cli) -> Result<MirrorReport> {
    let options = MirrorOptions::from_cli(cli)?;
    let cwd = std::env::current_dir().map_err(|e| MirrorError::Directory {
        path: PathBuf::from("."),
        message: format!("failed to get current working directory: {}", e),
    })?;

    run(&options, &cwd)
}

/// Clone `options.location` under `parent` and mirror its remote branches.
pub fn run(options: &MirrorOptions, parent: &Path) -> Result<MirrorReport> {
    // Everything that can be rejected up front is, before the clone.
    let name = options.directory_name()?;
    let clone_args = options.config.clone_args()?;
    let target = parent.join(&name);

    println!("Cloning {} into '{}'...", options.location, name);
    clone_repository(&options.location, &target, &clone_args)?;

    let repo = enter_directory(&target)?;

    println!("Fetching all remotes...");
    fetch_all(&repo, options.config.prune)?;

    let report = mirror_branches(&repo, &options.config)?;
    println!("{}", report.summary());
    Ok(report)
}

/// Clone `location` into `target`.
///
/// Fails without touching anything if `target` already exists. A git
/// failure keeps git's exit status so it can be propagated.
///
/// `--no-single-branch` always goes first: `--depth` in `extra_args` would
/// otherwise make git fetch the default branch only. An explicit
/// `--single-branch` in `extra_args` still wins.
pub fn clone_repository(location: &str, target: &Path, extra_args: &[String]) -> Result<()> {
    if target.symlink_metadata().is_ok() {
        return Err(MirrorError::Clone {
            location: location.to_string(),
            status: None,
            message: format!("destination path '{}' already exists", target.display()),
        });
    }

    // Run from the parent so relative locations resolve the way they would
    // for a plain `git clone` typed in the same directory.
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let target_arg = target.to_string_lossy().into_owned();

    if extra_args.iter().any(|arg| arg == "--single-branch") {
        warn!(
            location,
            "clone_args contains --single-branch; only one branch will be mirrored"
        );
    }

    let mut args: Vec<&str> = vec!["clone", "--no-single-branch"];
    args.extend(extra_args.iter().map(String::as_str));
    args.extend(["--", location, target_arg.as_str()]);

    let run = run_git_unchecked(&parent, &args)?;
    if !run.success {
        return Err(MirrorError::Clone {
            location: location.to_string(),
            status: run.code,
            message: run.output.error_message().to_string(),
        });
    }

    info!(location, path = %target.display(), "clone complete");
    Ok(())
}

/// Resolve the freshly cloned directory.
///
/// The process working directory is never changed; the returned absolute
/// path is used as the working directory of every later git command.
pub fn enter_directory(target: &Path) -> Result<PathBuf> {
    let metadata = std::fs::metadata(target).map_err(|e| MirrorError::Directory {
        path: target.to_path_buf(),
        message: e.to_string(),
    })?;

    if !metadata.is_dir() {
        return Err(MirrorError::Directory {
            path: target.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    target.canonicalize().map_err(|e| MirrorError::Directory {
        path: target.to_path_buf(),
        message: e.to_string(),
    })
}

/// `git fetch --all`, optionally with `--prune`.
pub fn fetch_all(repo: &Path, prune: bool) -> Result<()> {
    let mut args = vec!["fetch", "--all"];
    if prune {
        args.push("--prune");
    }

    let run = run_git_unchecked(repo, &args)?;
    if !run.success {
        return Err(MirrorError::Fetch(format!(
            "git fetch exited with status {}: {}",
            run.code.unwrap_or(-1),
            run.output.error_message()
        )));
    }
    Ok(())
}

/// Create a local tracking branch for every remote branch of `repo` that
/// has no local branch of the same name.
///
/// Existing local branches are never modified. Can be run on any existing
/// repository; running it twice creates nothing the second time.
pub fn mirror_branches(repo: &Path, config: &Config) -> Result<MirrorReport> {
    let filter = config.branch_filter()?;
    let remote_refs = list_remote_branches(repo, config.remote.as_deref())?;
    let mut report = MirrorReport::new(repo.to_path_buf());

    for remote_ref in remote_refs {
        if filter.is_excluded(&remote_ref.branch) {
            println!("Skipping '{}' (excluded)", remote_ref);
            report.skip(remote_ref, SkipReason::Excluded);
            continue;
        }

        if branch_exists(repo, &remote_ref.branch)? {
            let upstream = upstream_of(repo, &remote_ref.branch)?;
            if config.warn_on_upstream_mismatch
                && upstream.as_deref() != Some(remote_ref.full_name().as_str())
            {
                warn!(
                    branch = %remote_ref.branch,
                    expected = %remote_ref.full_name(),
                    actual = upstream.as_deref().unwrap_or("(none)"),
                    "existing local branch tracks a different upstream; leaving it unchanged"
                );
            }

            println!(
                "Local branch '{}' already exists, skipping",
                remote_ref.branch
            );
            report.skip(remote_ref, SkipReason::AlreadyExists { upstream });
            continue;
        }

        create_tracking_branch(repo, &remote_ref.branch, &remote_ref)?;
        println!(
            "Created local branch '{}' tracking '{}'",
            remote_ref.branch, remote_ref
        );
        report.created.push(remote_ref);
    }

    Ok(report)
}
