//! Connection management. A single writer serves reads and writes; the
//! tracker's volume never justifies a read pool.

pub mod pragmas;
pub mod write_connection;

pub use write_connection::WriteConnection;
