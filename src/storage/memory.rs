//! In-memory key-value store
//!
//! Used as the test double for the cache layer and for ephemeral guest
//! sessions where nothing should outlive the process.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStore, StorageError};

/// HashMap-backed store with an optional byte quota.
///
/// The quota counts key and value bytes the way a browser-style storage
/// medium would, so quota-exhaustion paths can be exercised in tests.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    max_bytes: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_bytes: None,
        }
    }

    /// Create a store that rejects writes once `max_bytes` of keys+values
    /// would be exceeded.
    pub fn with_quota(max_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_bytes: Some(max_bytes),
        }
    }

    fn used_bytes(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().expect("memory store lock");
        entries.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("memory store lock");

        if let Some(max) = self.max_bytes {
            // The write replaces any existing value for the key
            let existing = entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let used = Self::used_bytes(&entries) - existing;
            let needed = key.len() + value.len();
            if used + needed > max {
                return Err(StorageError::QuotaExceeded {
                    needed,
                    available: max.saturating_sub(used),
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("memory store lock");
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let entries = self.entries.lock().expect("memory store lock");
        entries.keys().cloned().collect()
    }
}
