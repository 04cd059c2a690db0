//! Diagnostic tracing for the CLI
//!
//! Reads `RUST_LOG`; defaults to `warn`, or `debug` with `--verbose`.
//! Output goes to stderr so table/JSON output on stdout stays clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
