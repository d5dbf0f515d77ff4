use serde::{Deserialize, Serialize};

use super::defaults;

/// Storage subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Enable WAL journal mode.
    pub wal_mode: bool,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
    /// Insert the Community Center catalogue when the store is empty.
    pub seed_on_open: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            wal_mode: defaults::DEFAULT_WAL_MODE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            seed_on_open: defaults::DEFAULT_SEED_ON_OPEN,
        }
    }
}
