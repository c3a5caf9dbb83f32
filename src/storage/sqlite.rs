//! SQLite-backed key-value store
//!
//! Production storage medium for cached data (`~/.quizkit/cache.db`).
//! A single `kv` table keeps the store dumb on purpose: expiration and
//! namespacing live in the cache layer, not here.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use super::{KeyValueStore, StorageError};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

/// Persistent store wrapping a shared SQLite connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the store at the default location (~/.quizkit/cache.db)
    pub fn open_default() -> Result<Self> {
        let db_path = Self::data_dir().join("cache.db");
        Self::open(&db_path)
    }

    /// Open or create the store at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open cache db: {}", path.display()))?;

        // WAL mode so UI reads and background revalidation writes interleave
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.execute_batch(SCHEMA_SQL)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Per-user data directory (~/.quizkit/)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quizkit")
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("cache db lock poisoned")
    }
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> Option<String> {
        let conn = self.conn();
        let result = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |r| r.get(0))
            .optional();

        match result {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("cache db read failed for '{}': {}", key, err);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = chrono::Utc::now().timestamp_millis();
        let conn = self.conn();
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, now],
        )
        .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.conn();
        conn.execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let conn = self.conn();
        let mut stmt = match conn.prepare("SELECT key FROM kv") {
            Ok(stmt) => stmt,
            Err(err) => {
                tracing::warn!("cache db key listing failed: {}", err);
                return Vec::new();
            }
        };

        match stmt.query_map([], |r| r.get(0)) {
            Ok(rows) => rows.filter_map(|r| r.ok()).collect(),
            Err(err) => {
                tracing::warn!("cache db key listing failed: {}", err);
                Vec::new()
            }
        }
    }
}
