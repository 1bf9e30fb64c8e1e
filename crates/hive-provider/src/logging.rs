//! Tracing setup for the provider process.
//!
//! Logs go to stderr; stdout belongs to the host handshake.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides `default_level`.
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter(default_level))
        .init();
}

/// Like [`init_logging`], but returns an error instead of panicking.
pub fn try_init_logging(
    default_level: &str,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter(default_level))
        .try_init()
}

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
