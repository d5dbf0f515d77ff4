//! Span definitions. The sync engine opens `valley.load` and `valley.update`
//! itself; the names are shared through `valley_core::constants`.

/// Create a health-check span.
#[macro_export]
macro_rules! health_span {
    () => {
        tracing::debug_span!($crate::tracing_setup::spans::names::HEALTH)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub use valley_core::constants::span_names::{HEALTH, LOAD, UPDATE};
}
