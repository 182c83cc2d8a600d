//! Key-value store schema definition and initialization.

use crate::errors::{AppResult, StorageError};
use rusqlite::Connection;
use tracing::debug;

/// Creates the key-value table.
///
/// This function is idempotent - it uses `CREATE TABLE IF NOT EXISTS`
/// so it's safe to call multiple times.
///
/// # Errors
///
/// Returns an error if the DDL statement fails.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating key-value table");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )
    .map_err(StorageError::Sqlite)?;

    debug!("Key-value table ready");
    Ok(())
}
