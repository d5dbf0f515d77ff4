//! Binds the store to the remote sync contract, so the optimistic engine can
//! treat it as its source of truth.

use valley_core::errors::{SyncError, ValleyError, ValleyResult};
use valley_core::models::{Bundle, ItemStatus, ProgressStats};
use valley_core::traits::IRemoteSyncClient;

use crate::engine::StorageEngine;

impl IRemoteSyncClient for StorageEngine {
    async fn fetch_all_bundles_with_items(&self) -> ValleyResult<Vec<Bundle>> {
        self.bundles_with_items().await
    }

    async fn fetch_progress_stats(&self) -> ValleyResult<ProgressStats> {
        self.progress_stats().await
    }

    async fn update_item_status(&self, item_id: &str, status: ItemStatus) -> ValleyResult<()> {
        self.set_item_status(item_id, status)
            .await
            .map_err(|e| match e {
                ValleyError::ItemNotFound { item_id } => SyncError::Rejected {
                    reason: format!("unknown item {item_id}"),
                    item_id,
                }
                .into(),
                other => other,
            })
    }
}
