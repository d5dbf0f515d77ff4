//! Local mirror of the remote bundle/item state.
//!
//! The store holds one immutable [`MirrorSnapshot`] at a time. Every mutation
//! builds a new snapshot and swaps it in; bundles that did not change are
//! shared between the old and new snapshot. Readers holding an older
//! snapshot keep seeing it unchanged.

use std::sync::Arc;

use valley_core::constants::ALL_ROOMS;
use valley_core::models::{Bundle, Item, ItemStatus};

/// An immutable view of every bundle and its items, in remote order.
#[derive(Debug, Clone, Default)]
pub struct MirrorSnapshot {
    bundles: Vec<Arc<Bundle>>,
}

impl MirrorSnapshot {
    fn new(bundles: Vec<Bundle>) -> Self {
        Self {
            bundles: bundles.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn bundles(&self) -> impl Iterator<Item = &Bundle> {
        self.bundles.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn bundle(&self, bundle_id: &str) -> Option<&Bundle> {
        self.bundles().find(|b| b.id == bundle_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.bundles()
            .flat_map(Bundle::items)
            .find(|i| i.id == item_id)
    }

    pub fn status_of(&self, item_id: &str) -> Option<ItemStatus> {
        self.item(item_id).map(|i| i.status)
    }

    pub fn item_count(&self) -> usize {
        self.bundles().map(|b| b.items().len()).sum()
    }

    /// Distinct rooms in first-seen order.
    pub fn rooms(&self) -> Vec<&str> {
        let mut rooms: Vec<&str> = Vec::new();
        for bundle in self.bundles() {
            if !rooms.contains(&bundle.room.as_str()) {
                rooms.push(&bundle.room);
            }
        }
        rooms
    }

    /// Bundles in `room`; [`ALL_ROOMS`] selects every bundle.
    pub fn bundles_in_room<'a>(&'a self, room: &'a str) -> impl Iterator<Item = &'a Bundle> {
        self.bundles()
            .filter(move |b| room == ALL_ROOMS || b.room == room)
    }

    /// Position of an item as (bundle index, item index).
    fn locate(&self, item_id: &str) -> Option<(usize, usize)> {
        self.bundles.iter().enumerate().find_map(|(bi, bundle)| {
            bundle
                .items()
                .iter()
                .position(|i| i.id == item_id)
                .map(|ii| (bi, ii))
        })
    }

    /// Shares pointers with `self`: only checks identity, not contents.
    pub fn shares_bundle_with(&self, other: &MirrorSnapshot, bundle_id: &str) -> bool {
        let mine = self.bundles.iter().find(|b| b.id == bundle_id);
        let theirs = other.bundles.iter().find(|b| b.id == bundle_id);
        matches!((mine, theirs), (Some(a), Some(b)) if Arc::ptr_eq(a, b))
    }
}

/// Holder of the current snapshot.
#[derive(Debug, Default)]
pub struct MirrorStore {
    current: Arc<MirrorSnapshot>,
}

impl MirrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly fetched bundle list.
    pub fn replace_all(&mut self, bundles: Vec<Bundle>) {
        self.current = Arc::new(MirrorSnapshot::new(bundles));
    }

    /// Drop all mirrored data.
    pub fn clear(&mut self) {
        self.current = Arc::default();
    }

    /// The current snapshot. Cheap; callers may hold it as long as they like.
    pub fn snapshot(&self) -> Arc<MirrorSnapshot> {
        Arc::clone(&self.current)
    }

    pub fn status_of(&self, item_id: &str) -> Option<ItemStatus> {
        self.current.status_of(item_id)
    }

    /// Set one item's status and return the status it had before.
    ///
    /// An unknown `item_id` leaves the store untouched and returns
    /// [`ItemStatus::Missing`]. That sentinel is indistinguishable from a real
    /// missing item; use [`MirrorStore::status_of`] first when the difference
    /// matters.
    pub fn mutate_item_status(&mut self, item_id: &str, status: ItemStatus) -> ItemStatus {
        let Some((bi, ii)) = self.current.locate(item_id) else {
            tracing::debug!(item_id, "mirror: item not found, nothing mutated");
            return ItemStatus::Missing;
        };

        let mut bundles = self.current.bundles.clone();
        let mut bundle = Bundle::clone(&bundles[bi]);
        let old = match bundle.items.as_mut().and_then(|items| items.get_mut(ii)) {
            Some(item) => std::mem::replace(&mut item.status, status),
            None => return ItemStatus::Missing,
        };
        bundles[bi] = Arc::new(bundle);
        self.current = Arc::new(MirrorSnapshot { bundles });
        old
    }
}
