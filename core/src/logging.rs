//! Development-time tracing for host programs embedding the engine.
//!
//! Dev diagnostics go to stderr via `RUST_LOG`; they are separate from the
//! product output that flows through [`crate::Emitter`].

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber for development logging.
///
/// Reads `RUST_LOG`, defaulting to `warn` if unset. Output goes to stderr in
/// compact format. Call at most once per process.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
