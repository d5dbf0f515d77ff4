//! Property tests: SQL aggregates agree with a count over the fetched rows.

use proptest::prelude::*;

use valley_core::models::{Bundle, Item, ItemStatus};
use valley_storage::StorageEngine;

fn status_strategy() -> impl Strategy<Value = ItemStatus> {
    prop_oneof![
        Just(ItemStatus::Missing),
        Just(ItemStatus::Collected),
        Just(ItemStatus::Delivered),
    ]
}

proptest! {
    #[test]
    fn prop_sql_stats_match_row_counts(
        required in 0u32..6,
        statuses in prop::collection::vec(status_strategy(), 0..12)
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let engine = StorageEngine::open_in_memory().unwrap();
            let items = statuses
                .iter()
                .enumerate()
                .map(|(i, s)| Item::new(&format!("i{i}"), "b", "x").with_status(*s))
                .collect();
            engine
                .insert_bundle(&Bundle::new("b", "B", "Pantry", required).with_items(items))
                .await
                .unwrap();

            let stats = engine.progress_stats().await.unwrap();
            let bundles = engine.bundles_with_items().await.unwrap();
            let bundle = &bundles[0];

            prop_assert_eq!(stats.total_items as usize, statuses.len());
            prop_assert_eq!(stats.collected_items, bundle.count_with_status(ItemStatus::Collected));
            prop_assert_eq!(stats.delivered_items, bundle.count_with_status(ItemStatus::Delivered));
            prop_assert_eq!(stats.bundles_completed, u32::from(bundle.is_complete()));
            prop_assert!(stats.collected_items + stats.delivered_items <= stats.total_items);
            Ok(())
        })?;
    }
}
