//! Process-local key-value store

use std::collections::HashMap;

use parking_lot::RwLock;
use wordforge_core::{KeyValueStore, StoreError};

/// `HashMap`-backed store with a per-value size quota
///
/// Nothing survives the process; used for `:memory:` configurations and
/// short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    max_value_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values larger than `max_value_bytes`
    pub fn with_quota(max_value_bytes: usize) -> Self {
        Self { values: RwLock::default(), max_value_bytes: Some(max_value_bytes) }
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(limit) = self.max_value_bytes {
            if value.len() > limit {
                return Err(StoreError::QuotaExceeded { needed: value.len(), limit });
            }
        }
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.write().remove(key);
        Ok(())
    }
}
