/// Errors raised on the remote side of the sync boundary.
///
/// The coordinator does not distinguish between these; any of them on the
/// update path triggers a full reload.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("remote call {operation} failed: {reason}")]
    RemoteFailed { operation: String, reason: String },

    #[error("remote rejected update of {item_id}: {reason}")]
    Rejected { item_id: String, reason: String },

    #[error("full load failed: {reason}")]
    LoadFailed { reason: String },

    #[error("unknown item {item_id} refused before dispatch")]
    UnknownItem { item_id: String },
}
