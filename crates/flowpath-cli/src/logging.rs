// Rust guideline compliant 2026-10-12

//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Picks the log filter: `RUST_LOG` wins, then `-v`, then the configured level.
///
/// # Arguments
/// * `rust_log` - Value of `RUST_LOG`, if set
/// * `verbose` - Whether `-v` was given
/// * `config_level` - Configured `log_level`
pub fn filter_directive(rust_log: Option<String>, verbose: bool, config_level: &str) -> String {
    match rust_log {
        Some(value) if !value.trim().is_empty() => value,
        _ if verbose => "debug".to_string(),
        _ => config_level.to_string(),
    }
}

/// Installs the global tracing subscriber.
///
/// An invalid directive falls back to `warn`. Calling this twice is a no-op.
pub fn init(verbose: bool, config_level: &str) {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), verbose, config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
