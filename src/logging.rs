use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Diagnostics go to stderr so that rendered fragments on stdout stay clean.
/// Honours `RUST_LOG`; defaults to warnings only. Safe to call more than
/// once: later installations are ignored.
pub fn initialize() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
