//! Tracing subscriber setup for hosts that do not install their own.

use tracing_subscriber::EnvFilter;

use crate::config::BridgeConfig;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, falling back to the
/// configured directive and then to `"error"`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing(config: &BridgeConfig) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match EnvFilter::try_new(&config.log_filter) {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("error"),
        },
    };

    // Mobile log sinks add their own timestamps and the target is noise there.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .with_target(false)
        .without_time()
        .try_init();
}
