//! In-process key-value store.
//!
//! # Invariants
//! - Every operation holds the map lock for its whole duration.
//! - A poisoned lock is reported, never recovered silently.

use super::{KvEntry, KvError, KvKey, KvResult, KvStore};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Mutex, MutexGuard};

/// `BTreeMap`-backed store, used for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<BTreeMap<KvKey, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries across all namespaces.
    pub fn len(&self) -> KvResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> KvResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> KvResult<MutexGuard<'_, BTreeMap<KvKey, String>>> {
        self.entries.lock().map_err(|_| KvError::Poisoned)
    }
}

impl KvStore for MemoryKvStore {
    fn set(&self, key: &KvKey, value: &str) -> KvResult<()> {
        self.lock()?.insert(key.clone(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &KvKey) -> KvResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn list(&self, prefix: &KvKey) -> KvResult<Vec<KvEntry>> {
        let entries = self.lock()?;
        let found = entries
            .range((Bound::Excluded(prefix.clone()), Bound::Unbounded))
            .take_while(|(key, _)| key.extends(prefix))
            .map(|(key, value)| KvEntry {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKvStore;
    use crate::kv::{KvKey, KvStore};

    #[test]
    fn list_returns_only_entries_under_prefix_in_key_order() {
        let store = MemoryKvStore::new();
        let visitors = KvKey::from_segments(["visitor"]);
        store.set(&visitors.child("b"), "2").unwrap();
        store.set(&visitors.child("a"), "1").unwrap();
        store.set(&KvKey::from_segments(["other", "x"]), "3").unwrap();
        store.set(&visitors, "namespace itself").unwrap();

        let listed = store.list(&visitors).unwrap();
        let values: Vec<_> = listed.iter().map(|entry| entry.value.as_str()).collect();
        assert_eq!(values, vec!["1", "2"]);
        assert_eq!(store.len().unwrap(), 4);
    }

    #[test]
    fn set_overwrites_and_delete_is_idempotent() {
        let store = MemoryKvStore::new();
        let key = KvKey::from_segments(["visitor", "a"]);

        store.set(&key, "old").unwrap();
        store.set(&key, "new").unwrap();
        assert_eq!(store.list(&KvKey::root()).unwrap()[0].value, "new");

        store.delete(&key).unwrap();
        store.delete(&key).unwrap();
        assert!(store.is_empty().unwrap());
    }
}
