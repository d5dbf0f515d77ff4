//! IRemoteSyncClient: the authoritative side of the optimistic sync boundary.
//!
//! Exactly three operations. Implementations own durable state; the sync
//! engine only ever consumes them.

use crate::errors::ValleyResult;
use crate::models::{Bundle, ItemStatus, ProgressStats};

/// Remote operations consumed by the optimistic coordinator.
///
/// Each call is a suspension point for the caller. Calls are never cancelled
/// once issued.
#[allow(async_fn_in_trait)]
pub trait IRemoteSyncClient: Send + Sync {
    /// Every bundle, each carrying its items.
    async fn fetch_all_bundles_with_items(&self) -> ValleyResult<Vec<Bundle>>;

    /// Full authoritative statistics, recomputed on the remote side.
    async fn fetch_progress_stats(&self) -> ValleyResult<ProgressStats>;

    /// Set one item's status. Fails for an unknown item id.
    async fn update_item_status(&self, item_id: &str, status: ItemStatus) -> ValleyResult<()>;
}
