//! Diagnostic logging setup.
//!
//! Progress messages meant for the user go to stdout with `println!`.
//! Everything logged through `tracing` goes to stderr, filtered by
//! `RUST_LOG` when set, otherwise by the `--verbose` flag.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter directive for a given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Install the global tracing subscriber.
///
/// Returns quietly if a subscriber is already installed (tests call this
/// more than once per process).
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
