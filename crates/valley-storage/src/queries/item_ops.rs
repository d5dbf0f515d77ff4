//! Insert, read and status updates for items.

use rusqlite::{params, Connection, OptionalExtension};

use valley_core::errors::{ValleyError, ValleyResult};
use valley_core::models::{Item, ItemStatus};

use crate::to_storage_err;

/// Insert an item row, ignoring it if the id already exists.
pub fn insert_item(conn: &Connection, item: &Item) -> ValleyResult<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO items (id, bundle_id, name, status, quality)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                item.id,
                item.bundle_id,
                item.name,
                item.status.as_str(),
                item.quality
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}

/// Items of one bundle, ordered by name.
pub fn items_for_bundle(conn: &Connection, bundle_id: &str) -> ValleyResult<Vec<Item>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, bundle_id, name, status, quality
             FROM items
             WHERE bundle_id = ?1
             ORDER BY name",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![bundle_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut items = Vec::new();
    for row in rows {
        let (id, bundle_id, name, status, quality) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        items.push(Item {
            id,
            bundle_id,
            name,
            status: status.parse()?,
            quality,
        });
    }
    Ok(items)
}

/// Current status of one item, `None` if the id is unknown.
pub fn get_status(conn: &Connection, item_id: &str) -> ValleyResult<Option<ItemStatus>> {
    let status: Option<String> = conn
        .query_row(
            "SELECT status FROM items WHERE id = ?1",
            params![item_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    status.map(|s| s.parse()).transpose()
}

/// Set an item's status. Unknown ids are an error, not a silent no-op.
pub fn update_status(conn: &Connection, item_id: &str, status: ItemStatus) -> ValleyResult<()> {
    let changed = conn
        .execute(
            "UPDATE items SET status = ?1 WHERE id = ?2",
            params![status.as_str(), item_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(ValleyError::ItemNotFound {
            item_id: item_id.to_string(),
        });
    }
    Ok(())
}
