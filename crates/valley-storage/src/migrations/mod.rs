//! Schema migrations, applied in order and recorded in `schema_version`.

mod v001_bundle_tables;
mod v002_status_check;

use rusqlite::Connection;

use valley_core::errors::{StorageError, ValleyResult};

use crate::to_storage_err;

type Migration = fn(&Connection) -> ValleyResult<()>;

const MIGRATIONS: [(u32, Migration); 2] = [
    (1, v001_bundle_tables::migrate),
    (2, v002_status_check::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = MIGRATIONS.len() as u32;

/// Apply every migration newer than the recorded schema version.
pub fn run_migrations(conn: &Connection) -> ValleyResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        migrate(conn).map_err(|e| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        })?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "applied migration");
    }
    Ok(LATEST_VERSION)
}

/// Highest applied version, 0 on a fresh database.
pub fn current_version(conn: &Connection) -> ValleyResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
