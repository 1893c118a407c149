//! libsql-backed persistent crawl state
//!
//! Backs the persistent crawl variant: each visited page is recorded
//! as it is fetched, so an interrupted crawl leaves reusable state and
//! a completed one can feed a later run without network activity.

use chrono::DateTime;
use libsql::{Connection, params};
use std::path::Path;
use tracing::instrument;

use super::{CrawlStore, PageRecord, StorageError, schema};
use async_trait::async_trait;

/// Persistent crawl-state store over a local libsql database
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a store over an existing connection
    #[instrument(skip(conn))]
    pub async fn new(conn: Connection) -> Result<Self, StorageError> {
        schema::initialize_schema(&conn).await?;
        Ok(Self { conn })
    }

    /// Open (or create) the database file at `path`
    pub async fn new_from_path(path: &Path) -> Result<Self, StorageError> {
        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Database(format!("failed to open database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Database(format!("failed to connect to database: {e}")))?;

        Self::new(conn).await
    }

    fn record_from_row(row: &libsql::Row) -> Result<PageRecord, StorageError> {
        let url: String = row
            .get(0)
            .map_err(|e| StorageError::Database(format!("failed to read url column: {e}")))?;
        let path: String = row
            .get(1)
            .map_err(|e| StorageError::Database(format!("failed to read path column: {e}")))?;
        let ts: i64 = row
            .get(2)
            .map_err(|e| StorageError::Database(format!("failed to read visited_at column: {e}")))?;
        let visited_at = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| StorageError::Database(format!("invalid visited_at value {ts}")))?;

        Ok(PageRecord {
            url,
            path,
            visited_at,
        })
    }
}

#[async_trait]
impl CrawlStore for Database {
    async fn is_empty(&self) -> Result<bool, StorageError> {
        let mut rows = self
            .conn
            .query("SELECT 1 FROM pages LIMIT 1", params![])
            .await
            .map_err(|e| StorageError::Database(format!("failed to query pages: {e}")))?;

        let first = rows
            .next()
            .await
            .map_err(|e| StorageError::Database(format!("failed to read pages: {e}")))?;
        Ok(first.is_none())
    }

    async fn record(&self, page: &PageRecord) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO pages (url, path, visited_at) VALUES (?, ?, ?)
                 ON CONFLICT(url) DO UPDATE SET
                 path = excluded.path,
                 visited_at = excluded.visited_at",
                params![
                    page.url.clone(),
                    page.path.clone(),
                    page.visited_at.timestamp(),
                ],
            )
            .await
            .map_err(|e| StorageError::Database(format!("failed to record page: {e}")))?;
        Ok(())
    }

    async fn pages(&self) -> Result<Vec<PageRecord>, StorageError> {
        let mut rows = self
            .conn
            .query(
                "SELECT url, path, visited_at FROM pages ORDER BY rowid",
                params![],
            )
            .await
            .map_err(|e| StorageError::Database(format!("failed to query pages: {e}")))?;

        let mut pages = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| StorageError::Database(format!("failed to read pages: {e}")))?
        {
            pages.push(Self::record_from_row(&row)?);
        }
        Ok(pages)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM pages", params![])
            .await
            .map_err(|e| StorageError::Database(format!("failed to clear pages: {e}")))?;
        Ok(())
    }
}
