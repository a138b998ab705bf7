//! Key-value document store
//!
//! Parsed user documents (audit records) can be memoized between operations.
//! The store is injected so callers decide where documents live; only an
//! in-memory implementation ships with the crate.

use std::collections::HashMap;
use std::hash::Hash;

/// Keyed storage for parsed documents
pub trait DocumentStore<K, V> {
    /// Cloned value stored under `key`, if any
    fn get(&self, key: &K) -> Option<V>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: K, value: V);

    /// Remove the value under `key`; removing a missing key is not an error
    fn delete(&mut self, key: &K);

    /// Remove every stored value
    fn clear(&mut self);
}

/// `HashMap`-backed [`DocumentStore`]
#[derive(Debug, Clone)]
pub struct MemoryStore<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> MemoryStore<K, V> {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Number of stored documents
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no documents
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for MemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V: Clone> DocumentStore<K, V> for MemoryStore<K, V> {
    fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    fn delete(&mut self, key: &K) {
        self.entries.remove(key);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
