//! Structured logging.
//!
//! Uses the `tracing` crate. `RUST_LOG` takes precedence; otherwise the level is
//! `info`, or `debug` when the collector runs with `--debug`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives for the given verbosity.
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "pinger_collector=debug,tower_http=debug"
    } else {
        "pinger_collector=info,tower_http=info"
    }
}

/// Initialize the global tracing subscriber.
pub fn init_logging(debug: bool) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(debug).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
