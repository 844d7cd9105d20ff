//! Diagnostic tracing for standings runs.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Diagnostics via `RUST_LOG`, output to stderr.
//!   Never mixed into the standings tables.
//!
//! - **Reports (`report`)**: Championship tables on stdout. Always written,
//!   unaffected by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset, which still surfaces
/// constructor changes and skipped lines.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=standings=debug cargo run -- run --dataset classic
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
