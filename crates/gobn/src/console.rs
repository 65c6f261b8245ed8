//! Console output for verbose sessions.
//!
//! Installs a plain `tracing-subscriber` formatter so build progress and
//! solver output reach the terminal. Auto-initialized by [`Gobn::new`]
//! when the configuration asks for verbose output.
//!
//! [`Gobn::new`]: crate::Gobn::new

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output for the gobn crates.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    });
}
