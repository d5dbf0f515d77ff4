//! Progress statistics: full recompute and single-transition deltas.
//!
//! The delta path only moves `collected_items` and `delivered_items` (and the
//! derived percentage). `bundles_completed` needs a scan of every bundle, so
//! it is only ever produced by [`full_recompute`] or by the remote side.

use valley_core::models::{Bundle, ItemStatus, ProgressStats};

/// How much one item in a given status adds to the aggregate counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub collected: u32,
    pub delivered: u32,
}

/// Transition table: the counter contribution of each status.
pub const fn contribution(status: ItemStatus) -> Contribution {
    match status {
        ItemStatus::Missing => Contribution {
            collected: 0,
            delivered: 0,
        },
        ItemStatus::Collected => Contribution {
            collected: 1,
            delivered: 0,
        },
        ItemStatus::Delivered => Contribution {
            collected: 0,
            delivered: 1,
        },
    }
}

/// Derive every statistic from a complete scan of `bundles`.
pub fn full_recompute<'a, I>(bundles: I) -> ProgressStats
where
    I: IntoIterator<Item = &'a Bundle>,
{
    let mut stats = ProgressStats::default();
    for bundle in bundles {
        stats.total_bundles += 1;
        if bundle.is_complete() {
            stats.bundles_completed += 1;
        }
        for item in bundle.items() {
            let c = contribution(item.status);
            stats.total_items += 1;
            stats.collected_items += c.collected;
            stats.delivered_items += c.delivered;
        }
    }
    stats.refresh_percentage();
    stats
}

/// Apply one `old -> new` transition to `stats`.
///
/// `total_items`, `total_bundles` and `bundles_completed` are carried over
/// unchanged. Same-status transitions return `stats` as is.
pub fn apply_delta(stats: &ProgressStats, old: ItemStatus, new: ItemStatus) -> ProgressStats {
    if old == new {
        return *stats;
    }
    let removed = contribution(old);
    let added = contribution(new);

    let mut next = *stats;
    next.collected_items = shift(stats.collected_items, removed.collected, added.collected);
    next.delivered_items = shift(stats.delivered_items, removed.delivered, added.delivered);
    next.refresh_percentage();
    next
}

/// `count - remove + add`, clamped at zero.
fn shift(count: u32, remove: u32, add: u32) -> u32 {
    match count.checked_sub(remove) {
        Some(n) => n + add,
        None => {
            // Only reachable when local stats already disagree with the
            // mirror, e.g. after out-of-order reconciliations.
            tracing::warn!(count, remove, "stats counter underflow, clamping to zero");
            add
        }
    }
}
