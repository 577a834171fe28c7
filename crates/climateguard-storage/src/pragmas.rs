//! SQLite PRAGMA configuration. Applied to every connection right after open.

use rusqlite::Connection;

use crate::errors::StorageResult;

/// - WAL so a reader never blocks the writer thread
/// - busy_timeout for lock contention
/// - NORMAL synchronous, the usual WAL durability trade-off
pub fn configure_connection(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA cache_size = -2000;
        PRAGMA temp_store = MEMORY;
        ",
    )?;
    Ok(())
}

pub fn is_wal(conn: &Connection) -> StorageResult<bool> {
    let mode: String = conn.pragma_query_value(None, "journal_mode", |row| row.get(0))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
