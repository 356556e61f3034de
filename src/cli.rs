//! CLI argument parsing for branch-mirror.
//!
//! Uses clap derive macros for declarative argument definitions. Exactly
//! one positional argument (the repository location) is accepted; clap
//! rejects any other count before anything touches the filesystem.

use crate::exit_codes;
use clap::Parser;
use std::path::PathBuf;

/// Clone a git repository and create a local tracking branch for every
/// remote branch that does not already exist locally.
#[derive(Parser, Debug)]
#[command(name = "branch-mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Repository to clone (URL, user@host:path, or local path).
    #[arg(value_name = "REPO_URL")]
    pub repo_url: String,

    /// Only mirror branches of this remote.
    #[arg(short, long)]
    pub remote: Option<String>,

    /// Clone into this directory instead of the name derived from REPO_URL.
    #[arg(short, long)]
    pub directory: Option<String>,

    /// YAML config file with defaults for the run.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Remove remote-tracking refs that no longer exist on the remote when fetching.
    #[arg(long)]
    pub prune: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Exit code for a failed parse: help and version requests succeed,
/// everything else is a usage error.
pub fn parse_failure_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        exit_codes::USER_ERROR
    } else {
        exit_codes::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_single_location() {
        let cli = Cli::try_parse_from(["branch-mirror", "https://example.com/org/repo.git"])
            .unwrap();
        assert_eq!(cli.repo_url, "https://example.com/org/repo.git");
        assert_eq!(cli.remote, None);
        assert_eq!(cli.directory, None);
        assert_eq!(cli.config, None);
        assert!(!cli.prune);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_all_options() {
        let cli = Cli::try_parse_from([
            "branch-mirror",
            "--remote",
            "upstream",
            "-d",
            "mirror",
            "--config",
            "mirror.yaml",
            "--prune",
            "-v",
            "git@host:org/repo.git",
        ])
        .unwrap();
        assert_eq!(cli.repo_url, "git@host:org/repo.git");
        assert_eq!(cli.remote.as_deref(), Some("upstream"));
        assert_eq!(cli.directory.as_deref(), Some("mirror"));
        assert_eq!(cli.config, Some(PathBuf::from("mirror.yaml")));
        assert!(cli.prune);
        assert!(cli.verbose);
    }

    #[test]
    fn missing_location_is_usage_error() {
        let err = Cli::try_parse_from(["branch-mirror"]).unwrap_err();
        assert_eq!(parse_failure_exit_code(&err), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("Usage"));
    }

    #[test]
    fn extra_positional_is_usage_error() {
        let err = Cli::try_parse_from(["branch-mirror", "one", "two"]).unwrap_err();
        assert_eq!(parse_failure_exit_code(&err), exit_codes::USER_ERROR);
    }

    #[test]
    fn help_is_not_an_error() {
        let err = Cli::try_parse_from(["branch-mirror", "--help"]).unwrap_err();
        assert_eq!(parse_failure_exit_code(&err), exit_codes::SUCCESS);
    }
}
