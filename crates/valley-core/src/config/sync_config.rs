use serde::{Deserialize, Serialize};

use super::defaults;

/// Optimistic sync configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Refuse status changes for item ids missing from the local mirror
    /// instead of dispatching them and reloading on the remote rejection.
    pub reject_unknown_items: bool,
    /// After a full reload, compare the fetched stats with a local full
    /// recompute and log any disagreement.
    pub verify_after_reload: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            reject_unknown_items: defaults::DEFAULT_REJECT_UNKNOWN_ITEMS,
            verify_after_reload: defaults::DEFAULT_VERIFY_AFTER_RELOAD,
        }
    }
}
