//! Insert and read bundles, with or without their items.

use rusqlite::{params, Connection};

use valley_core::errors::ValleyResult;
use valley_core::models::Bundle;

use crate::queries::item_ops;
use crate::to_storage_err;

/// Insert a bundle row, ignoring it if the id already exists.
/// Returns whether a row was written.
pub fn insert_bundle(conn: &Connection, bundle: &Bundle) -> ValleyResult<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO bundles (id, name, room, required_items)
             VALUES (?1, ?2, ?3, ?4)",
            params![bundle.id, bundle.name, bundle.room, bundle.required_items],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}

/// Insert a bundle together with its items in one transaction.
pub fn insert_bundle_with_items(conn: &Connection, bundle: &Bundle) -> ValleyResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_bundle begin: {e}")))?;

    insert_bundle(&tx, bundle)?;
    for item in bundle.items() {
        item_ops::insert_item(&tx, item)?;
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("insert_bundle commit: {e}")))?;
    Ok(())
}

/// All bundles without items, ordered by room then name.
pub fn all_bundles(conn: &Connection) -> ValleyResult<Vec<Bundle>> {
    let mut stmt = conn
        .prepare("SELECT id, name, room, required_items FROM bundles ORDER BY room, name")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(Bundle {
                id: row.get(0)?,
                name: row.get(1)?,
                room: row.get(2)?,
                required_items: row.get(3)?,
                items: None,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// All bundles, each carrying its items.
pub fn all_bundles_with_items(conn: &Connection) -> ValleyResult<Vec<Bundle>> {
    let mut bundles = all_bundles(conn)?;
    for bundle in &mut bundles {
        bundle.items = Some(item_ops::items_for_bundle(conn, &bundle.id)?);
    }
    Ok(bundles)
}

pub fn count_bundles(conn: &Connection) -> ValleyResult<u32> {
    conn.query_row("SELECT COUNT(*) FROM bundles", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
