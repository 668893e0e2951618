//! Persistence layer: key-value backend and snapshot codec.
//!
//! # Responsibility
//! - Define the narrow key-value contract the note store persists through.
//! - Provide the SQLite-backed implementation and its schema migrations.
//! - Encode/decode the full-notes JSON snapshot.
//!
//! # Invariants
//! - Values are opaque UTF-8 strings; `set` always overwrites completely.
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Snapshot decode rejects payloads that violate note invariants instead of
//!   masking them.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod migrations;
pub mod snapshot;

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence failure for key-value access and snapshot handling.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// Snapshot payload is not valid JSON of the expected shape.
    Snapshot(serde_json::Error),
    /// Snapshot parsed but violates a store invariant.
    InvalidSnapshot(String),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "snapshot payload is not parseable: {err}"),
            Self::InvalidSnapshot(message) => write!(f, "invalid snapshot: {message}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::InvalidSnapshot(_) => None,
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Snapshot(value)
    }
}
