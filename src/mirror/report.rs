//! Outcome of a mirror run.

use crate::refs::RemoteRef;
use std::path::PathBuf;

/// Why a remote branch did not get a new local branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A local branch of that name was already there. `upstream` is what it
    /// tracks (full ref name), if anything.
    AlreadyExists { upstream: Option<String> },
    /// The branch name matched an `exclude` pattern.
    Excluded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBranch {
    pub remote_ref: RemoteRef,
    pub reason: SkipReason,
}

/// What a mirror run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorReport {
    /// Absolute path of the repository the branches were created in.
    pub directory: PathBuf,
    /// Remote branches that got a new local tracking branch, in listing order.
    pub created: Vec<RemoteRef>,
    pub skipped: Vec<SkippedBranch>,
}

impl MirrorReport {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            created: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn skip(&mut self, remote_ref: RemoteRef, reason: SkipReason) {
        self.skipped.push(SkippedBranch { remote_ref, reason });
    }

    /// Local branch names created by the run.
    pub fn created_branches(&self) -> Vec<&str> {
        self.created.iter().map(|r| r.branch.as_str()).collect()
    }

    /// One-line completion message.
    pub fn summary(&self) -> String {
        format!(
            "Done. Created {} tracking {}, skipped {} in '{}'.",
            self.created.len(),
            if self.created.len() == 1 {
                "branch"
            } else {
                "branches"
            },
            self.skipped.len(),
            self.directory.display()
        )
    }
}
