//! Key-value storage backends for the cache layer
//!
//! The cache never talks to a concrete store directly; it goes through the
//! [`KeyValueStore`] trait so tests inject [`MemoryStore`] and production
//! uses [`SqliteStore`] (`~/.quizkit/cache.db`).

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Errors surfaced by storage backends.
///
/// Callers in the cache layer treat every variant as non-fatal, but quota
/// exhaustion is kept distinct so capacity-bounded stores can report it
/// honestly instead of hiding it behind a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage quota exceeded (needed {needed} bytes, {available} available)")]
    QuotaExceeded { needed: usize, available: usize },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Synchronous, string-keyed storage shared across the process.
///
/// Implementations own durability and capacity; the trait contract is that
/// `read` degrades to `None` on backend failures (after logging) so a broken
/// store behaves like an empty one.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for a key. `None` for missing keys and read failures.
    fn read(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Snapshot of all keys currently stored.
    fn keys(&self) -> Vec<String>;
}
