use std::io;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize diagnostics with environment-based filtering, on stderr
/// only: stdout is reserved for rendered event lines.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
