//! In-process reading store.
//!
//! An ordered map shared between clones of the handle. Useful for running the
//! dashboard without a datastore and for tests; contents do not survive a
//! restart.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Reading, StoredReading};

#[derive(Clone, Default)]
pub struct MemoryStore {
    readings: Arc<Mutex<BTreeMap<String, StoredReading>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, StoredReading>> {
        // a panic while holding the lock cannot leave the map half-updated
        self.readings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert(&self, key: &str, value: StoredReading) {
        self.lock().insert(key.to_string(), value);
    }

    pub fn last_n(&self, limit: u32) -> Vec<Reading> {
        self.lock()
            .iter()
            .rev()
            .take(limit as usize)
            .map(|(key, value)| Reading::from_stored(key.clone(), *value))
            .collect()
    }

    /// Number of stored readings.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when no reading has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn value(tds: f64) -> StoredReading {
        StoredReading {
            tds,
            temperature: 20.0,
        }
    }

    #[test]
    fn test_last_n_takes_greatest_keys() {
        // ---
        let store = MemoryStore::new();
        store.insert("2025-01-01T00:00:03", value(3.0));
        store.insert("2025-01-01T00:00:01", value(1.0));
        store.insert("2025-01-01T00:00:02", value(2.0));

        let tds: Vec<f64> = store.last_n(2).iter().map(|r| r.tds).collect();
        assert_eq!(tds, vec![3.0, 2.0]);
        assert_eq!(store.last_n(10).len(), 3);
        assert!(store.last_n(0).is_empty());
    }

    #[test]
    fn test_clones_share_contents() {
        // ---
        let store = MemoryStore::new();
        let handle = store.clone();
        assert!(store.is_empty());
        handle.insert("2025-01-01T00:00:00", value(5.0));
        assert_eq!(store.len(), 1);
    }
}
