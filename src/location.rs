//! Clone directory naming.
//!
//! The clone directory is named after the last path segment of the
//! repository location, minus a trailing `.git`. Handles URLs, scp-like
//! `user@host:path` locations, and local paths.

use crate::error::{MirrorError, Result};

/// Derive the clone directory name from a repository location.
///
/// # Examples
///
/// - `https://github.com/org/repo.git` -> `repo`
/// - `git@github.com:org/repo.git` -> `repo`
/// - `/srv/git/repo/` -> `repo`
///
/// # Returns
///
/// * `Ok(String)` - The directory name
/// * `Err(MirrorError::Usage)` - If no usable name remains
pub fn derive_directory_name(location: &str) -> Result<String> {
    let trimmed = location.trim().trim_end_matches(['/', '\\']);
    // `repo/.git` names the repository that contains it.
    let trimmed = trimmed
        .strip_suffix("/.git")
        .or_else(|| trimmed.strip_suffix("\\.git"))
        .unwrap_or(trimmed);

    // A URL with no path names the host: `ssh://git@host:2222` -> `host`.
    if let Some((_, authority)) = trimmed.split_once("://")
        && !authority.contains(['/', '\\'])
    {
        let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
        let host = match host.rsplit_once(':') {
            Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
            _ => host,
        };
        return usable_name(host, location);
    }

    let segment = trimmed.rsplit(['/', '\\', ':']).next().unwrap_or_default();
    usable_name(segment.strip_suffix(".git").unwrap_or(segment), location)
}

fn usable_name(name: &str, location: &str) -> Result<String> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(MirrorError::Usage(format!(
            "cannot derive a directory name from repository location '{}'",
            location
        )));
    }

    Ok(name.to_string())
}

/// Check a directory name given explicitly instead of derived.
pub fn validate_directory_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(MirrorError::Usage(format!(
            "invalid clone directory name '{}'",
            name
        )));
    }
    Ok(name.to_string())
}
