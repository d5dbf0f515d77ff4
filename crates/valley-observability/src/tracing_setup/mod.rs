//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use tracing_subscriber::EnvFilter;

use valley_core::config::{defaults, ObservabilityConfig};
use valley_core::errors::{ValleyError, ValleyResult};

/// Environment variable read for the filter directive.
pub const LOG_ENV: &str = "VALLEY_LOG";

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `VALLEY_LOG` environment variable for filtering.
/// Defaults to `defaults::DEFAULT_LOG_LEVEL` if not set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .init();
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .init();
}

/// Initialize from config. `VALLEY_LOG` still wins over `log_level` when set.
///
/// Unlike the other initializers this does not panic when a global
/// subscriber is already installed; it reports a config error instead.
pub fn init_from_config(config: &ObservabilityConfig) -> ValleyResult<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ValleyError::ConfigError {
            reason: format!("invalid log filter {:?}: {e}", config.log_level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json_output {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| ValleyError::ConfigError {
        reason: format!("tracing subscriber: {e}"),
    })
}
