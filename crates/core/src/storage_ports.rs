//! Key-value store port used to persist the cache snapshot.
//!
//! The contract is deliberately small: whole-value reads and writes under a
//! string key. Adapters report failures through [`StoreError`] so the cache
//! can tell a full or briefly unavailable store from a broken one.
//!
//! # Example
//!
//! ```
//! use wordforge_core::{KeyValueStore, StoreError};
//!
//! fn save(store: &dyn KeyValueStore, payload: &str) -> bool {
//!     match store.write("wordforge:anagram-cache:v1", payload) {
//!         Ok(()) => true,
//!         Err(err) if err.is_transient() => false,
//!         Err(_) => false,
//!     }
//! }
//! ```

use std::time::Duration;

use thiserror::Error;
use wordforge_common::{ErrorClassification, ErrorSeverity};
use wordforge_domain::WordForgeError;

/// Failure reported by a key-value store adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The value does not fit in the store's remaining quota
    #[error("storage quota exceeded: {needed} bytes requested, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },

    /// The store is temporarily unavailable (busy, locked)
    #[error("transient storage failure: {0}")]
    Transient(String),

    /// Any other backend failure
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Failures that trimming the payload and writing again may fix
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. } | Self::Transient(_))
    }
}

impl ErrorClassification for StoreError {
    fn is_retryable(&self) -> bool {
        self.is_transient()
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::QuotaExceeded { .. } | Self::Transient(_) => ErrorSeverity::Warning,
            Self::Backend(_) => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl From<StoreError> for WordForgeError {
    fn from(err: StoreError) -> Self {
        WordForgeError::Persistence(err.to_string())
    }
}

/// Port for a persistent string key-value store
///
/// Implementations are synchronous; the cache only calls them outside of its
/// entry lock.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`; removing an absent key succeeds
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
