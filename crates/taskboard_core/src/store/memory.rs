//! In-process key-value medium.
//!
//! Clones share one backing map, so a caller can hand one handle to the
//! persistence adapter and inspect what was written through another.

use super::{KeyValueStore, StoreResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Volatile store backed by a shared `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value` under `key`.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::KeyValueStore;

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let observer = store.clone();

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();

        assert_eq!(observer.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(observer.len(), 1);

        observer.remove("k").unwrap();
        observer.remove("k").unwrap();
        assert!(store.is_empty());
    }
}
