//! StorageEngine: owns the connection, runs migrations and seeding at
//! startup, and exposes async bundle/item/stats operations.

use std::path::Path;

use rusqlite::Connection;

use valley_core::config::StorageConfig;
use valley_core::constants::VERSION;
use valley_core::errors::ValleyResult;
use valley_core::models::{Bundle, ItemStatus, ProgressStats};

use crate::pool::pragmas::{self, apply_pragmas};
use crate::pool::WriteConnection;
use crate::queries::{bundle_ops, item_ops, stats};
use crate::{migrations, seed, to_storage_err};

/// The authoritative store.
pub struct StorageEngine {
    writer: WriteConnection,
}

impl StorageEngine {
    /// Open the database named by `config.db_path`, seeding it if configured.
    pub fn from_config(config: &StorageConfig) -> ValleyResult<Self> {
        let conn =
            Connection::open(&config.db_path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn, config)
    }

    /// Open a file-backed store with default settings (seeded).
    pub fn open(path: &Path) -> ValleyResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn, &StorageConfig::default())
    }

    /// Open an empty in-memory store (for testing). Not seeded.
    pub fn open_in_memory() -> ValleyResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        let config = StorageConfig {
            seed_on_open: false,
            ..StorageConfig::default()
        };
        Self::initialize(conn, &config)
    }

    /// Open an in-memory store holding the full catalogue.
    pub fn open_in_memory_seeded() -> ValleyResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn, &StorageConfig::default())
    }

    /// Pragmas, migrations and seeding run before the connection is shared,
    /// so startup never has to block on the async lock.
    fn initialize(conn: Connection, config: &StorageConfig) -> ValleyResult<Self> {
        apply_pragmas(&conn, config)?;
        let schema = migrations::run_migrations(&conn)?;
        if config.seed_on_open {
            seed::seed_if_empty(&conn)?;
        }
        tracing::info!(version = VERSION, schema, "store opened");
        Ok(Self {
            writer: WriteConnection::new(conn),
        })
    }

    pub async fn insert_bundle(&self, bundle: &Bundle) -> ValleyResult<()> {
        self.writer
            .with_conn(|conn| bundle_ops::insert_bundle_with_items(conn, bundle))
            .await
    }

    pub async fn bundles_with_items(&self) -> ValleyResult<Vec<Bundle>> {
        self.writer
            .with_conn(bundle_ops::all_bundles_with_items)
            .await
    }

    pub async fn progress_stats(&self) -> ValleyResult<ProgressStats> {
        self.writer.with_conn(stats::progress_stats).await
    }

    pub async fn item_status(&self, item_id: &str) -> ValleyResult<Option<ItemStatus>> {
        self.writer
            .with_conn(|conn| item_ops::get_status(conn, item_id))
            .await
    }

    pub async fn set_item_status(&self, item_id: &str, status: ItemStatus) -> ValleyResult<()> {
        self.writer
            .with_conn(|conn| item_ops::update_status(conn, item_id, status))
            .await?;
        tracing::debug!(item_id, status = %status, "item status stored");
        Ok(())
    }

    /// Status update from an untyped wire value. Rejects anything outside
    /// `missing | collected | delivered` before touching the store.
    pub async fn set_item_status_wire(&self, item_id: &str, status: &str) -> ValleyResult<()> {
        let status: ItemStatus = status.parse()?;
        self.set_item_status(item_id, status).await
    }

    /// Active journal mode, lowercased ("wal", "delete", "memory").
    pub async fn journal_mode(&self) -> ValleyResult<String> {
        self.writer.with_conn(pragmas::journal_mode).await
    }

    pub async fn schema_version(&self) -> ValleyResult<u32> {
        self.writer.with_conn(migrations::current_version).await
    }
}
