//! # valley-storage
//!
//! The authoritative side of the tracker: a SQLite store holding bundles and
//! items, with the Community Center catalogue as seed data. [`StorageEngine`]
//! implements [`valley_core::IRemoteSyncClient`], so the sync engine can run
//! against it directly.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod remote;
pub mod seed;

pub use engine::StorageEngine;

use valley_core::errors::{StorageError, ValleyError};

/// Wrap any SQLite-side failure message as a storage error.
pub fn to_storage_err(message: String) -> ValleyError {
    ValleyError::StorageError(StorageError::SqliteError { message })
}
