//! Error taxonomy for the Bundle Valley workspace.

mod storage_error;
mod sync_error;

pub use storage_error::StorageError;
pub use sync_error::SyncError;

/// Result alias used across every crate in the workspace.
pub type ValleyResult<T> = Result<T, ValleyError>;

/// Top-level error. Subsystem errors convert into it with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ValleyError {
    #[error("item not found: {item_id}")]
    ItemNotFound { item_id: String },

    #[error("invalid status: {status}")]
    InvalidStatus { status: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("sync error: {0}")]
    SyncError(#[from] SyncError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {reason}")]
    ConfigError { reason: String },
}
