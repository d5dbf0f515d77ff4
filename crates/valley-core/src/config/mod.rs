//! Layered configuration: every section falls back to `defaults`.

pub mod defaults;
mod observability_config;
mod storage_config;
mod sync_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ValleyError, ValleyResult};

pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;
pub use sync_config::SyncConfig;

/// Top-level configuration, one table per subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValleyConfig {
    pub storage: StorageConfig,
    pub sync: SyncConfig,
    pub observability: ObservabilityConfig,
}

impl ValleyConfig {
    /// Parse a TOML document. Missing tables and keys take their defaults.
    pub fn from_toml(source: &str) -> ValleyResult<Self> {
        toml::from_str(source).map_err(|e| ValleyError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> ValleyResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ValleyError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&source)
    }
}
