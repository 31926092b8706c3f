//! Tracing subscriber setup for the command-line tool
//! Created: 2026-10-14
//!
//! The library only emits events; installing a subscriber is left to the
//! binary or the embedding application.

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered at `level`.
///
/// `RUST_LOG` takes precedence when set. Returns false when a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        debug!("Logger initialized with level: {}", level);
    }
    installed
}
