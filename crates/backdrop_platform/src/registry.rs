//! Bookkeeping for platform resources that end on their own.
//!
//! Browser timers and image requests are registered while live. The callback
//! that ends one calls `finish`, which takes the entry out of the live set so
//! it can no longer be cancelled. The finished entry is kept until the next
//! `finish`: the callback doing the finishing may be owned by that entry and
//! must not drop itself.

use std::collections::HashMap;
use std::hash::Hash;

/// Live entries keyed by request, plus the most recently finished one.
#[derive(Debug)]
pub struct Registry<K, V> {
    live: HashMap<K, V>,
    retired: Option<V>,
}

impl<K: Eq + Hash, V> Registry<K, V> {
    pub fn new() -> Self {
        Self {
            live: HashMap::new(),
            retired: None,
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.live.insert(key, value);
    }

    /// Retire `key` after it completed. Drops the previously retired entry.
    /// Returns false if `key` was not live.
    pub fn finish(&mut self, key: &K) -> bool {
        let finished = self.live.remove(key);
        let was_live = finished.is_some();
        self.retired = finished;
        was_live
    }

    /// Take a live entry out, as on cancellation.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.live.remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
