//! Key-value persistence contract and implementations.
//!
//! # Responsibility
//! - Define the narrow get/set-by-key contract the note store depends on.
//! - Provide the SQLite-backed implementation used on device.
//! - Provide an in-memory implementation for tests and host shells.
//!
//! # Invariants
//! - Returned SQLite connections have migrations fully applied and
//!   `foreign_keys=ON` before any application read/write.
//! - `set` replaces the whole value for a key; there is no partial write API.

use super::migrations::apply_migrations;
use super::StorageResult;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

/// Key-value persistence port.
///
/// This is the only storage surface the note store sees; device shells plug
/// their native storage in behind it.
pub trait KeyValueStore {
    /// Reads the full value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Overwrites the value stored under `key` completely.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// SQLite-backed key-value store.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens a database file and applies all pending migrations.
    ///
    /// # Side effects
    /// - Emits `kv_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        open_with("file", || Connection::open(path).map_err(Into::into))
    }

    /// Opens an in-memory database and applies all pending migrations.
    ///
    /// # Side effects
    /// - Emits `kv_open` logging events with duration and status.
    pub fn open_in_memory() -> StorageResult<Self> {
        open_with("memory", || {
            Connection::open_in_memory().map_err(Into::into)
        })
    }

    /// Escape hatch for schema assertions in tests and diagnostics.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn open_with(
    mode: &str,
    open: impl FnOnce() -> StorageResult<Connection>,
) -> StorageResult<SqliteKvStore> {
    let started_at = Instant::now();
    info!("event=kv_open module=storage status=start mode={mode}");

    let result = open().and_then(|mut conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;
        Ok(conn)
    });

    match result {
        Ok(conn) => {
            info!(
                "event=kv_open module=storage status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(SqliteKvStore { conn })
        }
        Err(err) => {
            error!(
                "event=kv_open module=storage status=error mode={mode} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory key-value store for tests and host shells.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one entry, for constructing pre-populated fixtures.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
