//! v002: reject status strings outside the three-way enum at the SQL level.

use rusqlite::Connection;

use valley_core::errors::ValleyResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> ValleyResult<()> {
    conn.execute_batch(
        "
        CREATE TRIGGER IF NOT EXISTS trg_items_status_insert
        BEFORE INSERT ON items
        WHEN NEW.status NOT IN ('missing', 'collected', 'delivered')
        BEGIN
            SELECT RAISE(ABORT, 'invalid item status');
        END;

        CREATE TRIGGER IF NOT EXISTS trg_items_status_update
        BEFORE UPDATE OF status ON items
        WHEN NEW.status NOT IN ('missing', 'collected', 'delivered')
        BEGIN
            SELECT RAISE(ABORT, 'invalid item status');
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
