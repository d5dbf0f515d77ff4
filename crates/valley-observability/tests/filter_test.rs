use tracing_subscriber::EnvFilter;

use valley_core::config::{defaults, ObservabilityConfig};
use valley_observability::tracing_setup::LOG_ENV;

#[test]
fn default_log_level_is_a_valid_filter() {
    assert!(EnvFilter::try_new(defaults::DEFAULT_LOG_LEVEL).is_ok());
    assert_eq!(
        ObservabilityConfig::default().log_level,
        defaults::DEFAULT_LOG_LEVEL
    );
}

#[test]
fn filter_env_var_is_namespaced() {
    assert_eq!(LOG_ENV, "VALLEY_LOG");
}
