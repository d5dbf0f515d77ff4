//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use valley_core::config::StorageConfig;
use valley_core::errors::ValleyResult;

use crate::to_storage_err;

/// Apply journal, sync, timeout and foreign-key pragmas to a connection.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> ValleyResult<()> {
    let journal_mode = if config.wal_mode { "WAL" } else { "DELETE" };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal_mode};
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = {};
        PRAGMA foreign_keys = ON;
        ",
        config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Report the active journal mode, lowercased.
pub fn journal_mode(conn: &Connection) -> ValleyResult<String> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.to_ascii_lowercase())
}
