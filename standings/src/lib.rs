//! Drivers' and constructors' championship standings from round results.
//!
//! Reads a stream of round blocks, one `position#driver#constructor#time` line
//! per classified finisher, and keeps both championships up to date after
//! every round. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (parsing, scoring, updates, ordering).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, opening the results file,
//!   data-set selection, snapshots).
//!
//! Orchestration modules ([`ingest`], [`report`]) coordinate core logic with
//! I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod ingest;
pub mod io;
pub mod logging;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
