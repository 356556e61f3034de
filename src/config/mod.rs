//! Configuration for branch-mirror.
//!
//! An optional YAML file (`--config <path>`) supplies defaults for the
//! mirror run; command-line flags override it. Unknown fields are ignored
//! and every field has a default, so an empty file is a valid config.

mod model;
mod operations;


// Re-export public API
pub use model::Config;
pub use operations::BranchFilter;
