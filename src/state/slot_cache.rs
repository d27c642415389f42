//! Registry of slots whose image has finished loading.
//!
//! An entry exists for a slot if and only if its image is ready to be shown.
//! Entries are never removed, so readiness is monotonic for the lifetime of a
//! session.

use std::collections::HashMap;

use backdrop_platform::DisplayHandle;

/// Two-level mapping city → index → display handle.
#[derive(Debug, Default)]
pub struct SlotCache {
    cities: HashMap<String, HashMap<u32, DisplayHandle>>,
    len: usize,
}

impl SlotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a loaded slot. First writer wins; returns false if the slot was
    /// already recorded.
    pub fn record_ready(&mut self, city: &str, index: u32, handle: DisplayHandle) -> bool {
        let slots = self.cities.entry(city.to_string()).or_default();
        if slots.contains_key(&index) {
            return false;
        }
        slots.insert(index, handle);
        self.len += 1;
        true
    }

    pub fn is_ready(&self, city: &str, index: u32) -> bool {
        self.get(city, index).is_some()
    }

    pub fn get(&self, city: &str, index: u32) -> Option<&DisplayHandle> {
        self.cities.get(city).and_then(|slots| slots.get(&index))
    }

    /// Whether any slot of `city` is ready.
    pub fn has_city(&self, city: &str) -> bool {
        self.cities.get(city).is_some_and(|slots| !slots.is_empty())
    }

    /// Number of ready slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_until_recorded() {
        let mut cache = SlotCache::new();
        assert!(!cache.is_ready("sf", 1));
        assert!(!cache.has_city("sf"));
        assert_eq!(cache.get("sf", 1), None);

        assert!(cache.record_ready("sf", 1, DisplayHandle::new("sf-1")));
        assert!(cache.is_ready("sf", 1));
        assert!(cache.has_city("sf"));
        assert!(!cache.is_ready("sf", 2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_writer_wins() {
        let mut cache = SlotCache::new();
        assert!(cache.record_ready("sf", 2, DisplayHandle::new("first")));
        assert!(!cache.record_ready("sf", 2, DisplayHandle::new("second")));

        assert_eq!(cache.get("sf", 2), Some(&DisplayHandle::new("first")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_readiness_is_monotonic() {
        let mut cache = SlotCache::new();
        cache.record_ready("nyc", 3, DisplayHandle::new("nyc-3"));
        for index in 1..=4 {
            cache.record_ready("la", index, DisplayHandle::new(format!("la-{}", index)));
            assert!(cache.is_ready("nyc", 3));
        }
        assert_eq!(cache.len(), 5);
        assert!(!cache.is_empty());
    }
}
