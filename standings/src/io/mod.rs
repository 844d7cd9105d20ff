//! I/O helpers for standings commands.

pub mod config;
pub mod dataset;
pub mod files;
pub mod snapshot;
pub mod source;
