//! Logging and tracing utilities
//!
//! Events go to stderr so panel output on stdout stays readable.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with `info` as the default filter
pub fn init_tracing() {
    init_tracing_with("info");
}

/// Initialize tracing with a fallback filter
///
/// `RUST_LOG` wins when it is set and parses; otherwise `default_filter` is
/// used.
pub fn init_tracing_with(default_filter: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(build_filter(rust_log.as_deref(), default_filter))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn build_filter(directives: Option<&str>, default_filter: &str) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter))
}
