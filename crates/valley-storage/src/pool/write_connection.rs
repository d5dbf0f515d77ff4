//! Single connection behind `tokio::sync::Mutex`.
//! Serialized access, no contention worth pooling for.

use rusqlite::Connection;
use tokio::sync::Mutex;

use valley_core::errors::ValleyResult;

/// A single connection protected by an async mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Take ownership of an already-configured connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Acquire the lock and execute a closure with the connection.
    pub async fn with_conn<F, T>(&self, f: F) -> ValleyResult<T>
    where
        F: FnOnce(&Connection) -> ValleyResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }
}
