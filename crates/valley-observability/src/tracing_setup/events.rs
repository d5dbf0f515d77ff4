//! Structured log events emitted by the observability layer.
//!
//! Each function emits a `tracing` event with structured fields.

use crate::health::HealthStatus;

/// Log a health status that is anything but healthy.
pub fn health_degraded(status: HealthStatus, problems: &[String]) {
    if status != HealthStatus::Healthy {
        tracing::warn!(
            event = "health_degraded",
            status = %status,
            problems = ?problems,
            "sync health degraded"
        );
    }
}
