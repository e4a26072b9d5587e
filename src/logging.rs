//! Logging setup shared by both binaries.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global `tracing` subscriber used by both binaries.
///
/// `RUST_LOG` is honoured; without it the crate logs at `info`. Calling this
/// twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("labour_etl=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
