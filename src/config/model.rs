//! Config struct definition and default implementation.

use serde::Deserialize;

/// Configuration for a mirror run.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Only mirror branches of this remote. `None` mirrors every remote.
    pub remote: Option<String>,

    /// Pass `--prune` to `git fetch --all`.
    pub prune: bool,

    /// Extra arguments for `git clone`, split like a shell would
    /// (e.g. `"--depth 50 --filter=blob:none"`).
    pub clone_args: String,

    /// Glob patterns; remote branches whose name matches one are not mirrored.
    pub exclude: Vec<String>,

    /// Warn when an existing local branch tracks something other than the
    /// remote branch of the same name.
    #[serde(default = "default_true")]
    pub warn_on_upstream_mismatch: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: None,
            prune: false,
            clone_args: String::new(),
            exclude: Vec::new(),
            warn_on_upstream_mismatch: default_true(),
        }
    }
}
