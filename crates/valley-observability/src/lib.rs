//! # valley-observability
//!
//! Structured tracing setup with span definitions and log events, plus a
//! health report derived from the sync engine's current view.

pub mod health;
pub mod tracing_setup;

pub use health::{HealthReport, HealthReporter, HealthSnapshot, HealthStatus};
