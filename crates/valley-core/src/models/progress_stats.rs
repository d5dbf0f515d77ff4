use serde::{Deserialize, Serialize};

/// Aggregate completion statistics.
///
/// `progress_percentage` is derived from `delivered_items` and `total_items`;
/// use [`ProgressStats::percentage_of`] whenever either changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_items: u32,
    pub collected_items: u32,
    pub delivered_items: u32,
    pub progress_percentage: f32,
    pub bundles_completed: u32,
    pub total_bundles: u32,
}

impl ProgressStats {
    /// `delivered / total * 100`, 0 when `total` is 0.
    pub fn percentage_of(delivered: u32, total: u32) -> f32 {
        if total > 0 {
            delivered as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    }

    /// Re-derive `progress_percentage` from the current counters.
    pub fn refresh_percentage(&mut self) {
        self.progress_percentage = Self::percentage_of(self.delivered_items, self.total_items);
    }

    /// Whether two snapshots agree on the counters that a single status
    /// transition can move. `bundles_completed` is deliberately not compared.
    pub fn same_item_counters(&self, other: &Self) -> bool {
        self.total_items == other.total_items
            && self.collected_items == other.collected_items
            && self.delivered_items == other.delivered_items
            && self.progress_percentage == other.progress_percentage
    }
}
