//! Key/value persistence for player state
//!
//! Every engine talks to storage through [`KeyValueStore`], an opaque
//! string-blob store keyed by name. Two backends ship with the crate:
//!
//! - [`MemoryStore`]: process-local map, used by tests and throwaway runs
//! - [`SqliteStore`]: a single `kv` table in `~/.quizstreak/data.db`
//!
//! Stores assume a single logical writer. Two processes sharing one
//! database file each read-modify-write whole records, so the last write
//! wins.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Error type for store backends
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Durable string storage keyed by name
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Store whose every call fails, for exercising the swallow-and-log paths
#[cfg(test)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Poisoned)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }
}
