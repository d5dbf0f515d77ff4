use serde::{Deserialize, Serialize};

use super::item::{Item, ItemStatus};

/// A named collection of required items tied to a room.
///
/// `items` is `None` when the bundle was fetched without its items; such a
/// bundle contributes no items to any aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,
    pub name: String,
    /// Grouping label.
    pub room: String,
    /// Delivered items needed for completion.
    pub required_items: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
}

impl Bundle {
    pub fn new(id: &str, name: &str, room: &str, required_items: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            room: room.to_string(),
            required_items,
            items: None,
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = Some(items);
        self
    }

    /// Loaded items, or an empty slice for an unloaded bundle.
    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Number of items currently in `status`.
    pub fn count_with_status(&self, status: ItemStatus) -> u32 {
        self.items().iter().filter(|i| i.status == status).count() as u32
    }

    pub fn delivered_count(&self) -> u32 {
        self.count_with_status(ItemStatus::Delivered)
    }

    /// Complete once the delivered count reaches `required_items`.
    pub fn is_complete(&self) -> bool {
        self.delivered_count() >= self.required_items
    }

    pub fn progress(&self) -> BundleProgress {
        BundleProgress::new(self.delivered_count(), self.required_items)
    }
}

/// Delivered-versus-required progress of one bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BundleProgress {
    pub delivered: u32,
    pub required: u32,
    /// `delivered / required * 100`, 0 when nothing is required.
    /// Not capped: bundles with more items than required can exceed 100.
    pub percent: f32,
}

impl BundleProgress {
    pub fn new(delivered: u32, required: u32) -> Self {
        let percent = if required > 0 {
            delivered as f32 / required as f32 * 100.0
        } else {
            0.0
        };
        Self {
            delivered,
            required,
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.delivered >= self.required
    }
}
