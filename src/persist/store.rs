//! Generic string-keyed store seam.
//!
//! The persistence manager treats storage as an opaque key-value surface; the
//! actual backend (browser local storage, a file, a database table) lives
//! outside this crate. [`MemoryStore`] is the in-process implementation used
//! by tests and headless sessions.

use std::collections::BTreeMap;

/// String-keyed blob store consumed by the persistence manager.
pub trait KvStore {
    /// Read a value, `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: String);

    /// Remove a key. Removing an absent key is fine.
    fn delete(&mut self, key: &str);

    /// All present keys, in no guaranteed order.
    fn list_keys(&self) -> Vec<String>;
}

/// In-memory store backed by a `BTreeMap`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn list_keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
