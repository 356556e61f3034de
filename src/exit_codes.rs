//! Exit code constants for the branch-mirror CLI.
//!
//! - 0: Success
//! - 1: User error (bad arguments, invalid config)
//! - 3: Git operation failure (fetch, ref listing, branch creation)
//! - 4: Could not enter the cloned directory
//!
//! Clone failures reuse git's own exit status when it has one.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: wrong argument count, unusable location, invalid config.
pub const USER_ERROR: i32 = 1;

/// Git operation failure, and the fallback for clone failures without a status.
pub const GIT_FAILURE: i32 = 3;

/// The clone directory is missing or is not a directory.
pub const DIRECTORY_FAILURE: i32 = 4;
