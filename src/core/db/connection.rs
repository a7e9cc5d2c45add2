/// Connection Management Module
///
/// This module provides helpers for opening configured SQLite connections.
/// Pooling and connection lifecycle management are deliberately out of
/// scope; callers own the returned connection and pass it to the
/// transaction runner as needed.
use crate::core::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Opens a SQLite database at the specified path.
///
/// The connection is configured with foreign key enforcement and WAL
/// journaling. Use `":memory:"`-style databases via [`open_in_memory`]
/// instead.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    debug!("Opening database at {:?}", path.as_ref());
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
    ",
    )?;
    Ok(conn)
}

/// Opens an in-memory SQLite database with foreign key enforcement on.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}
