//! Structured logging on stderr
//!
//! Stdout carries command output only, so every log line goes to stderr.

use crate::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Filter used when `--verbose` is given: debug for this crate, warn elsewhere
const VERBOSE_FILTER: &str = "warn,agent_social=debug";

/// Pick the filter directive: `--verbose`, then `RUST_LOG`, then settings
pub fn filter_directive(settings: &LoggingSettings, verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return VERBOSE_FILTER.to_string();
    }
    rust_log
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| settings.level.clone())
}

/// Install the global subscriber
pub fn init_logging(settings: &LoggingSettings, verbose: bool) {
    let directive = filter_directive(settings, verbose, std::env::var("RUST_LOG").ok());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&directive))
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    let result = match settings.format.as_str() {
        "json" => builder.json().try_init(),
        "pretty" => builder.pretty().try_init(),
        _ => builder.compact().try_init(),
    };

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }
}
