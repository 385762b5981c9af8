//! Tracing subscriber setup shared by binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing subscriber.
///
/// `verbose` forces debug level; otherwise `RUST_LOG` wins over the
/// configured `default_level`. Logs go to stderr so command output stays
/// clean on stdout.
pub fn init_tracing(verbose: bool, default_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
