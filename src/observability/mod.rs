//! Observability for schoolval
//!
//! Structured logging through `tracing`. Library code emits events with
//! an `event` field drawn from [`Event`]; the binary installs a subscriber
//! that writes to stderr, as plain text or one JSON object per line.
//!
//! # Principles
//!
//! 1. Logging is read-only: it never changes a validation result
//! 2. Logs go to stderr; stdout carries only command output
//! 3. `RUST_LOG` overrides the configured level

mod events;

pub use events::Event;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `level` is an env-filter directive such as `warn` or `schoolval=debug`.
/// Calling this twice is harmless; the second call is ignored.
pub fn init(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
