//! SQL operations, one module per concern.

pub mod bundle_ops;
pub mod item_ops;
pub mod stats;
