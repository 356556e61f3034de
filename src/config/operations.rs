//! Config loading, validation, and the helpers the mirror run needs.

use super::model::Config;
use crate::error::{MirrorError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(MirrorError::Config)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            MirrorError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the config file if one was given, otherwise use defaults.
    pub fn load_optional<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| MirrorError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of file values.
    ///
    /// `prune` can only be switched on from the command line.
    pub fn with_overrides(mut self, remote: Option<String>, prune: bool) -> Result<Self> {
        if remote.is_some() {
            self.remote = remote;
        }
        self.prune |= prune;
        self.validate()?;
        Ok(self)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `remote`, when set, must be non-empty and contain no whitespace
    /// - `clone_args` must split cleanly (no unmatched quotes)
    /// - every `exclude` pattern must be a valid glob
    pub fn validate(&self) -> Result<()> {
        if let Some(remote) = &self.remote
            && (remote.is_empty() || remote.chars().any(char::is_whitespace))
        {
            return Err(MirrorError::Config(format!(
                "remote must be a non-empty name without whitespace (found '{}')",
                remote
            )));
        }

        self.clone_args()?;
        self.branch_filter()?;
        Ok(())
    }

    /// `clone_args` split into individual arguments.
    pub fn clone_args(&self) -> Result<Vec<String>> {
        shell_words::split(&self.clone_args).map_err(|e| {
            MirrorError::Config(format!(
                "failed to parse clone_args '{}': {}\n\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.clone_args, e
            ))
        })
    }

    /// Compile the `exclude` patterns.
    pub fn branch_filter(&self) -> Result<BranchFilter> {
        BranchFilter::new(&self.exclude)
    }
}

/// Compiled `exclude` patterns.
#[derive(Debug, Clone)]
pub struct BranchFilter {
    excluded: GlobSet,
}

impl BranchFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                MirrorError::Config(format!("invalid exclude pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }

        let excluded = builder
            .build()
            .map_err(|e| MirrorError::Config(format!("invalid exclude patterns: {}", e)))?;
        Ok(Self { excluded })
    }

    /// Whether a branch name (without remote prefix) is excluded.
    pub fn is_excluded(&self, branch: &str) -> bool {
        self.excluded.is_match(branch)
    }
}
