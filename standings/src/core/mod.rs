//! Deterministic, pure championship logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod error;
pub mod invariants;
pub mod lap_time;
pub mod points;
pub mod result_line;
pub mod sorter;
pub mod standings;
pub mod types;
