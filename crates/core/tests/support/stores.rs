//! In-memory `KeyValueStore` with failure injection

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use wordforge_core::{KeyValueStore, StoreError};

/// How the next writes should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFailure {
    /// Fail only the next write with a quota error
    QuotaOnce,
    /// Fail every write with a transient error
    AlwaysTransient,
    /// Fail every write with a backend error
    AlwaysBackend,
}

/// Thread-safe map store that counts writes and can be told to fail
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    failure: Mutex<Option<WriteFailure>>,
    writes: AtomicUsize,
    failed_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a raw value under `key`
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.lock().insert(key.to_string(), value.to_string());
        store
    }

    pub fn fail_writes(&self, failure: WriteFailure) {
        *self.failure.lock() = Some(failure);
    }

    pub fn heal(&self) {
        *self.failure.lock() = None;
    }

    /// Successful writes so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn failed_writes(&self) -> usize {
        self.failed_writes.load(Ordering::SeqCst)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut failure = self.failure.lock();
        let error = match *failure {
            Some(WriteFailure::QuotaOnce) => {
                *failure = None;
                Some(StoreError::QuotaExceeded { needed: value.len(), limit: 0 })
            }
            Some(WriteFailure::AlwaysTransient) => {
                Some(StoreError::Transient("database is locked".into()))
            }
            Some(WriteFailure::AlwaysBackend) => Some(StoreError::Backend("disk I/O error".into())),
            None => None,
        };
        drop(failure);

        if let Some(error) = error {
            self.failed_writes.fetch_add(1, Ordering::SeqCst);
            return Err(error);
        }

        self.values.lock().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.lock().remove(key);
        Ok(())
    }
}
