//! Key-value storage media for persisted snapshots.
//!
//! # Responsibility
//! - Define the synchronous get/set/remove contract the persistence adapter
//!   writes through.
//! - Provide an in-process medium and a durable SQLite medium.
//!
//! # Invariants
//! - `set` replaces the whole value under a key in one write.
//! - A failed write leaves the previous value readable.
//! - SQLite schema version is tracked via `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
pub mod migrations;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{open_store, open_store_in_memory, SqliteStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of the storage medium itself.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous text key-value storage.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` when nothing was written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Deletes `key`; deleting a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
