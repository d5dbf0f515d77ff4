// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "bundle-valley.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_SEED_ON_OPEN: bool = true;

// --- Sync ---
pub const DEFAULT_REJECT_UNKNOWN_ITEMS: bool = false;
pub const DEFAULT_VERIFY_AFTER_RELOAD: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_OUTPUT: bool = true;
