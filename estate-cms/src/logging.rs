//! Process-wide `tracing` subscriber.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` is used as the filter directive,
/// falling back to `info` if it does not parse. Calling this more than once is
/// harmless: only the first subscriber is installed.
pub fn init(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}
