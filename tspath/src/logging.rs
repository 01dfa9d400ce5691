//! Development-time tracing for debugging resolution.
//!
//! Events go to stderr so that paths printed on stdout stay machine-readable.
//! Resolution warnings (stray `coordres`) are emitted at `warn` and are
//! visible by default.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=tspath=debug cargo run -p tspath -- stitch '[leftonto(<0,0>), <0,0>]'
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
