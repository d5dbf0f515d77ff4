//! Property tests for the stats aggregator and the sync state machine.

use proptest::prelude::*;

use valley_core::models::{Bundle, Item, ItemStatus, ProgressStats};
use valley_sync::aggregator::{apply_delta, full_recompute};
use valley_sync::{SyncEvent, SyncState};

fn status() -> impl Strategy<Value = ItemStatus> {
    prop_oneof![
        Just(ItemStatus::Missing),
        Just(ItemStatus::Collected),
        Just(ItemStatus::Delivered),
    ]
}

/// Up to 6 bundles of up to 6 items each, with arbitrary initial statuses.
fn bundles() -> impl Strategy<Value = Vec<Bundle>> {
    prop::collection::vec((0u32..5, prop::collection::vec(status(), 0..6)), 1..6).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(b, (required, statuses))| {
                    let bundle_id = format!("b{b}");
                    let items = statuses
                        .into_iter()
                        .enumerate()
                        .map(|(i, s)| {
                            Item::new(&format!("b{b}-i{i}"), &bundle_id, "item").with_status(s)
                        })
                        .collect();
                    Bundle::new(&bundle_id, &bundle_id, "Pantry", required).with_items(items)
                })
                .collect()
        },
    )
}

fn loaded(bundles: Vec<Bundle>) -> SyncState {
    let stats = full_recompute(&bundles);
    let mut state = SyncState::new();
    state.apply(SyncEvent::Loaded { bundles, stats });
    state
}

fn item_ids(bundles: &[Bundle]) -> Vec<String> {
    bundles
        .iter()
        .flat_map(Bundle::items)
        .map(|i| i.id.clone())
        .collect()
}

proptest! {
    #[test]
    fn delta_matches_full_scan_after_any_sequence(
        bundles in bundles(),
        picks in prop::collection::vec((any::<prop::sample::Index>(), status()), 0..40),
    ) {
        let ids = item_ids(&bundles);
        prop_assume!(!ids.is_empty());
        let mut state = loaded(bundles);

        for (index, status) in picks {
            let item_id = index.get(&ids).clone();
            state.apply(SyncEvent::StatusChanged { item_id, status });
        }

        let incremental = state.stats().unwrap();
        let scanned = state.recompute_stats();
        prop_assert!(incremental.same_item_counters(&scanned));
    }

    #[test]
    fn total_items_is_conserved(
        bundles in bundles(),
        picks in prop::collection::vec((any::<prop::sample::Index>(), status()), 0..40),
    ) {
        let ids = item_ids(&bundles);
        prop_assume!(!ids.is_empty());
        let mut state = loaded(bundles);
        let total = state.stats().unwrap().total_items;

        for (index, status) in picks {
            let item_id = index.get(&ids).clone();
            state.apply(SyncEvent::StatusChanged { item_id, status });
            prop_assert_eq!(state.stats().unwrap().total_items, total);
            prop_assert_eq!(state.snapshot().item_count() as u32, total);
        }
    }

    #[test]
    fn collected_and_delivered_never_exceed_total(
        bundles in bundles(),
        picks in prop::collection::vec((any::<prop::sample::Index>(), status()), 0..40),
    ) {
        let ids = item_ids(&bundles);
        prop_assume!(!ids.is_empty());
        let mut state = loaded(bundles);

        for (index, status) in picks {
            let item_id = index.get(&ids).clone();
            state.apply(SyncEvent::StatusChanged { item_id, status });
            let stats = state.stats().unwrap();
            prop_assert!(stats.collected_items + stats.delivered_items <= stats.total_items);
        }
    }

    #[test]
    fn same_status_delta_is_identity(
        total in 0u32..100,
        collected in 0u32..50,
        delivered in 0u32..50,
        status in status(),
    ) {
        let mut stats = ProgressStats {
            total_items: total,
            collected_items: collected,
            delivered_items: delivered,
            ..ProgressStats::default()
        };
        stats.refresh_percentage();
        prop_assert_eq!(apply_delta(&stats, status, status), stats);
    }

    #[test]
    fn round_trip_transition_restores_counters(
        bundles in bundles(),
        index in any::<prop::sample::Index>(),
        via in status(),
    ) {
        let ids = item_ids(&bundles);
        prop_assume!(!ids.is_empty());
        let mut state = loaded(bundles);
        let item_id = index.get(&ids).clone();
        let before = state.stats().unwrap();
        let original = state.snapshot().status_of(&item_id).unwrap();

        state.apply(SyncEvent::StatusChanged { item_id: item_id.clone(), status: via });
        state.apply(SyncEvent::StatusChanged { item_id, status: original });

        prop_assert_eq!(state.stats().unwrap(), before);
    }
}
