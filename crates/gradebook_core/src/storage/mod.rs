//! Persistence adapter seam for the gradebook store.
//!
//! # Responsibility
//! - Define the durable key-value contract the store writes through to.
//! - Name the persisted document keys.
//!
//! # Invariants
//! - `set` has whole-value overwrite semantics: no partial updates.
//! - There are no transactions across keys; a crash between the two
//!   store writes can leave `scoreData` and `deletedRows` mutually
//!   inconsistent. Preventing that is out of scope.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod migrations;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::{SqliteStorage, DEFAULT_DB_FILE_NAME};

/// Persisted key holding the serialized gradebook mapping.
pub const SCORE_DATA_KEY: &str = "scoreData";
/// Persisted key holding the serialized deleted-subject sequence.
pub const DELETED_ROWS_KEY: &str = "deletedRows";

pub type StorageResult<T> = Result<T, StorageError>;

/// Adapter-level error for durable key-value storage.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Durable key-value storage consumed by the gradebook store.
///
/// The store reads both documents once at session start and writes the
/// full affected document back on every mutation.
pub trait StorageAdapter {
    /// Returns the serialized document for `key`, or `None` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrites the document for `key` in full.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
