//! # valley-core
//!
//! Foundation crate for the Bundle Valley progress tracker.
//! Defines the wire models, the remote sync trait, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ValleyConfig;
pub use errors::{ValleyError, ValleyResult};
pub use models::{Bundle, Item, ItemStatus, ProgressStats};
pub use traits::IRemoteSyncClient;
