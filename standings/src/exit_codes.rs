//! Stable exit codes for standings CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Malformed results, invalid config, failed invariant check, or other errors.
pub const INVALID: i32 = 1;
/// The results file could not be opened.
pub const UNAVAILABLE: i32 = 2;
