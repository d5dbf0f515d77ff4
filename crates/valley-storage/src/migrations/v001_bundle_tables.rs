//! v001: bundles and items.

use rusqlite::Connection;

use valley_core::errors::ValleyResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> ValleyResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS bundles (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            room            TEXT NOT NULL,
            required_items  INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS items (
            id         TEXT PRIMARY KEY,
            bundle_id  TEXT NOT NULL,
            name       TEXT NOT NULL,
            status     TEXT NOT NULL DEFAULT 'missing',
            quality    TEXT,
            FOREIGN KEY (bundle_id) REFERENCES bundles(id)
        );

        CREATE INDEX IF NOT EXISTS idx_items_bundle ON items(bundle_id);
        CREATE INDEX IF NOT EXISTS idx_items_status ON items(status);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
