//! Schema for the persistent crawl-state database

use libsql::{Connection, params};

use super::StorageError;

/// Initialize the crawl-state schema
///
/// One table: `pages`, keyed by the fetched URL. `rowid` ordering is
/// the recording order.
pub async fn initialize_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS pages (
            url TEXT PRIMARY KEY,
            path TEXT NOT NULL,
            visited_at INTEGER NOT NULL
        )",
        params![],
    )
    .await
    .map_err(|e| StorageError::Database(format!("failed to create pages table: {e}")))?;

    Ok(())
}
