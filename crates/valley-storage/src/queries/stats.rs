//! Authoritative progress statistics, computed in SQL.

use rusqlite::Connection;

use valley_core::errors::ValleyResult;
use valley_core::models::ProgressStats;

use crate::to_storage_err;

/// Full recompute of [`ProgressStats`] over the whole store.
///
/// A bundle counts as completed once its delivered items reach
/// `required_items`.
pub fn progress_stats(conn: &Connection) -> ValleyResult<ProgressStats> {
    let (total_items, collected_items, delivered_items): (u32, u32, u32) = conn
        .query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(status = 'collected'), 0),
                    COALESCE(SUM(status = 'delivered'), 0)
             FROM items",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let (total_bundles, bundles_completed): (u32, u32) = conn
        .query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(
                        (SELECT COUNT(*) FROM items i
                         WHERE i.bundle_id = b.id AND i.status = 'delivered')
                        >= b.required_items
                    ), 0)
             FROM bundles b",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(ProgressStats {
        total_items,
        collected_items,
        delivered_items,
        progress_percentage: ProgressStats::percentage_of(delivered_items, total_items),
        bundles_completed,
        total_bundles,
    })
}
