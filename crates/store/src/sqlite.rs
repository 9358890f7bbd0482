//! SQLite record store
//!
//! One `records` table of (key, JSON text). Selector constraints are
//! evaluated with `json_extract` against bound parameters; rows that are not
//! valid JSON never match.

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::{StoreError, StoreResult};
use crate::selector::Selector;
use crate::traits::{QueryResults, RecordStore, StoredDocument};

/// SQLite-backed record store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS records (
                key TEXT PRIMARY KEY,
                doc TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Number of stored records
    pub fn count(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl RecordStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let conn = self.lock()?;
        let doc = conn
            .query_row(
                "SELECT doc FROM records WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(doc.map(String::into_bytes))
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let doc = std::str::from_utf8(value)
            .map_err(|_| StoreError::InvalidDocument(key.to_string()))?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO records (key, doc) VALUES (?1, ?2)",
            params![key, doc],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM records WHERE key = ?1", params![key])?;

        if rows == 0 {
            return Err(StoreError::NotFound(key.to_string()));
        }

        Ok(())
    }

    fn query(&self, selector: &Selector) -> StoreResult<QueryResults<'_>> {
        // json_extract raises on malformed text, so guard it per row.
        let mut sql = String::from("SELECT key, doc FROM records WHERE 1 = 1");
        for (i, (field, _)) in selector.constraints().iter().enumerate() {
            sql.push_str(&format!(
                " AND CASE WHEN json_valid(doc) THEN json_extract(doc, '{}') END = ?{}",
                field.json_path(),
                i + 1
            ));
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let values = selector.constraints().iter().map(|(_, value)| value.as_str());
        let hits: Vec<StoredDocument> = stmt
            .query_map(params_from_iter(values), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?.into_bytes()))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(query = %selector.to_query_string(), hits = hits.len(), "sqlite query");
        Ok(Box::new(hits.into_iter().map(Ok)))
    }
}
