//! Remote-tracking branch discovery.
//!
//! Lists `refs/remotes/*` with `git branch -r` in a machine-readable format,
//! drops symbolic references (such as `origin/HEAD`), and splits each ref
//! into its remote name and branch name using the repository's configured
//! remotes rather than a fixed `origin/` prefix.

use crate::error::Result;
use crate::git::{list_remotes, run_git};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// `<full refname>` TAB `<symref target>`; the target is empty for plain refs.
const LISTING_FORMAT: &str = "--format=%(refname)%09%(symref)";

const REMOTES_PREFIX: &str = "refs/remotes/";

/// A remote-tracking branch, e.g. `refs/remotes/origin/feature/x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    /// Name of the remote that owns the ref (`origin`).
    pub remote: String,
    /// Branch name with the remote prefix removed (`feature/x`).
    pub branch: String,
}

impl RemoteRef {
    pub fn new(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            branch: branch.into(),
        }
    }

    /// `origin/feature/x`
    pub fn short_name(&self) -> String {
        format!("{}/{}", self.remote, self.branch)
    }

    /// `refs/remotes/origin/feature/x`
    pub fn full_name(&self) -> String {
        format!("{}{}/{}", REMOTES_PREFIX, self.remote, self.branch)
    }
}

impl fmt::Display for RemoteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// List the non-symbolic remote-tracking branches of a repository.
///
/// # Arguments
///
/// * `repo` - Path to the repository
/// * `only_remote` - Restrict the result to refs of this remote
pub fn list_remote_branches<P: AsRef<Path>>(
    repo: P,
    only_remote: Option<&str>,
) -> Result<Vec<RemoteRef>> {
    let repo = repo.as_ref();
    let remotes = list_remotes(repo)?;
    let listing = run_git(repo, &["branch", "-r", LISTING_FORMAT])?;

    let refs = parse_remote_branches(&listing.stdout, &remotes)
        .into_iter()
        .filter(|r| only_remote.is_none_or(|name| r.remote == name))
        .collect();
    Ok(refs)
}

/// Parse the output of `git branch -r --format=%(refname)%09%(symref)`.
///
/// Blank lines, symbolic refs, refs outside `refs/remotes/`, and refs whose
/// remote is not in `remotes` are skipped.
pub fn parse_remote_branches(listing: &str, remotes: &[String]) -> Vec<RemoteRef> {
    let mut refs = Vec::new();

    for line in listing.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (refname, symref) = match line.split_once('\t') {
            Some((refname, symref)) => (refname.trim(), symref.trim()),
            None => (line, ""),
        };

        if !symref.is_empty() {
            debug!(refname, points_to = symref, "skipping symbolic ref");
            continue;
        }

        let Some(rest) = refname.strip_prefix(REMOTES_PREFIX) else {
            debug!(refname, "skipping ref outside refs/remotes/");
            continue;
        };

        match split_remote(rest, remotes) {
            Some(remote_ref) if remote_ref.branch != "HEAD" => refs.push(remote_ref),
            Some(_) => debug!(refname, "skipping remote HEAD"),
            None => debug!(refname, "no configured remote owns this ref"),
        }
    }

    refs
}

/// Split `<remote>/<branch>` using the longest configured remote name that
/// matches, so remotes whose names contain `/` are handled.
fn split_remote(name: &str, remotes: &[String]) -> Option<RemoteRef> {
    remotes
        .iter()
        .filter_map(|remote| {
            name.strip_prefix(remote.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .filter(|branch| !branch.is_empty())
                .map(|branch| (remote, branch))
        })
        .max_by_key(|(remote, _)| remote.len())
        .map(|(remote, branch)| RemoteRef::new(remote.as_str(), branch))
}
