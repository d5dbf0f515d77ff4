//! Property tests for the wire models.

use proptest::prelude::*;

use valley_core::models::{Bundle, BundleProgress, Item, ItemStatus, ProgressStats};

fn status() -> impl Strategy<Value = ItemStatus> {
    prop::sample::select(ItemStatus::ALL.to_vec())
}

proptest! {
    #[test]
    fn status_text_round_trips(status in status()) {
        let parsed: ItemStatus = status.to_string().parse().unwrap();
        prop_assert_eq!(parsed, status);

        let json = serde_json::to_string(&status).unwrap();
        prop_assert_eq!(&json, &format!("\"{}\"", status.as_str()));
        let back: ItemStatus = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, status);
    }

    #[test]
    fn unknown_status_strings_are_rejected(text in "[a-z]{1,12}") {
        prop_assume!(ItemStatus::ALL.iter().all(|s| s.as_str() != text));
        prop_assert!(text.parse::<ItemStatus>().is_err());
    }

    #[test]
    fn percentage_stays_within_bounds(total in 0u32..10_000, share in 0.0f64..=1.0) {
        let delivered = (f64::from(total) * share) as u32;
        let pct = ProgressStats::percentage_of(delivered, total);
        prop_assert!((0.0..=100.0).contains(&pct));
        if total == 0 {
            prop_assert_eq!(pct, 0.0);
        }
    }

    #[test]
    fn bundle_progress_agrees_with_bundle(
        required in 0u32..6,
        statuses in prop::collection::vec(status(), 0..8),
    ) {
        let items = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| Item::new(&format!("i{i}"), "b", "item").with_status(*s))
            .collect();
        let bundle = Bundle::new("b", "B", "Pantry", required).with_items(items);
        let delivered = statuses.iter().filter(|s| **s == ItemStatus::Delivered).count() as u32;

        let progress = bundle.progress();
        prop_assert_eq!(progress, BundleProgress::new(delivered, required));
        prop_assert_eq!(progress.is_complete(), bundle.is_complete());
        prop_assert_eq!(bundle.is_complete(), delivered >= required);
    }
}
