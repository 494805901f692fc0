//! SQLite-backed storage adapter.
//!
//! # Responsibility
//! - Open file or in-memory SQLite storage for gradebook documents.
//! - Apply schema migrations before any document read or write.
//! - Implement the key-value adapter contract over one `kv_entries` table.
//!
//! # Invariants
//! - Returned adapters have migrations fully applied.
//! - `set` is an upsert: one row per key, whole-value overwrite.

use super::migrations::apply_migrations;
use super::{StorageAdapter, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Default database file name for callers that do not pick their own path.
pub const DEFAULT_DB_FILE_NAME: &str = "gradebook.sqlite3";

/// Durable adapter holding one SQLite connection.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens a database file and applies all pending migrations.
    ///
    /// # Side effects
    /// - Emits `db_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=storage status=start mode=file");
        let conn = Connection::open(path);
        Self::bootstrap(conn, "file", started_at)
    }

    /// Opens an in-memory database and applies all pending migrations.
    ///
    /// # Side effects
    /// - Emits `db_open` logging events with duration and status.
    pub fn open_in_memory() -> StorageResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=storage status=start mode=memory");
        let conn = Connection::open_in_memory();
        Self::bootstrap(conn, "memory", started_at)
    }

    fn bootstrap(
        conn: Result<Connection, rusqlite::Error>,
        mode: &str,
        started_at: Instant,
    ) -> StorageResult<Self> {
        let mut conn = match conn {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=storage status=error mode={mode} duration_ms={} error_code=db_open_failed error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        conn.busy_timeout(Duration::from_secs(5))?;
        if let Err(err) = apply_migrations(&mut conn) {
            error!(
                "event=db_open module=storage status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err);
        }

        info!(
            "event=db_open module=storage status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(Self { conn })
    }
}

impl StorageAdapter for SqliteStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
