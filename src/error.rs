//! Error types for the branch-mirror CLI.
//!
//! Uses thiserror for derive macros. Each variant corresponds to one step of
//! the mirror workflow and maps to a process exit code.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for branch-mirror operations.
#[derive(Error, Debug)]
pub enum MirrorError {
    /// Wrong arguments or a location no directory name can be derived from.
    #[error("{0}")]
    Usage(String),

    /// The config file could not be read, parsed, or validated.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// `git clone` failed, or the target directory already exists.
    ///
    /// `status` carries git's exit status so it can be propagated unchanged.
    #[error("failed to clone '{location}': {message}")]
    Clone {
        location: String,
        status: Option<i32>,
        message: String,
    },

    /// The clone directory could not be entered.
    #[error("cannot enter directory '{}': {message}", .path.display())]
    Directory { path: PathBuf, message: String },

    /// `git fetch --all` failed.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Any other git operation failed (listing refs, creating a branch).
    #[error("git operation failed: {0}")]
    Git(String),
}

impl MirrorError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MirrorError::Usage(_) | MirrorError::Config(_) => exit_codes::USER_ERROR,
            MirrorError::Clone { status, .. } => match status {
                Some(code) if (1..=255).contains(code) => *code,
                _ => exit_codes::GIT_FAILURE,
            },
            MirrorError::Directory { .. } => exit_codes::DIRECTORY_FAILURE,
            MirrorError::Fetch(_) | MirrorError::Git(_) => exit_codes::GIT_FAILURE,
        }
    }
}

/// Result type alias for branch-mirror operations.
pub type Result<T> = std::result::Result<T, MirrorError>;
