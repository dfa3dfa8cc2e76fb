//! Anagram cache service

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};
use wordforge_common::{Cache, CacheConfig, CacheStats, Clock, EntryRecord, SystemClock};
use wordforge_domain::constants::{CACHE_CAPACITY, CACHE_STORAGE_KEY};
use wordforge_domain::{AnagramRecord, CacheKey, DifficultyLevel};

use super::snapshot::{self, SnapshotEntry};
use crate::random::RandomSource;
use crate::storage_ports::{KeyValueStore, StoreError};

/// How a mutation's snapshot write ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistOutcome {
    /// Written on the first attempt
    Persisted,
    /// First write hit a transient or quota failure; one entry was evicted
    /// and the retry succeeded
    PersistedAfterTrim,
    /// Not written; the in-memory state is still authoritative
    Failed,
}

impl PersistOutcome {
    pub fn is_persisted(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Result of [`AnagramCache::preload`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreloadSummary {
    pub loaded: usize,
    pub evicted: usize,
    pub persist: PersistOutcome,
}

/// Bounded, persisted cache of anagram records
///
/// Every public operation is safe to call concurrently. Entry access goes
/// through the cache's own lock; snapshot writes are serialized by a
/// separate lock so that a later write always carries a state at least as
/// new as an earlier one.
pub struct AnagramCache {
    entries: Cache<CacheKey, AnagramRecord, Arc<dyn Clock>>,
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    clock: Arc<dyn Clock>,
    rng: RandomSource,
    persist_lock: Mutex<()>,
    persistence_failures: AtomicU64,
    /// Set when in-memory state is newer than the last successful write
    dirty: AtomicBool,
}

/// Builder for [`AnagramCache`]
pub struct AnagramCacheBuilder {
    store: Arc<dyn KeyValueStore>,
    capacity: usize,
    storage_key: String,
    clock: Arc<dyn Clock>,
    rng: Option<RandomSource>,
}

impl AnagramCacheBuilder {
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn rng(mut self, rng: RandomSource) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Build the cache and load any prior snapshot from the store
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cache.
    pub fn build(self) -> AnagramCache {
        let cache = AnagramCache {
            entries: Cache::with_clock(CacheConfig::lru(self.capacity), Arc::clone(&self.clock)),
            store: self.store,
            storage_key: self.storage_key,
            clock: self.clock,
            rng: self.rng.unwrap_or_default(),
            persist_lock: Mutex::new(()),
            persistence_failures: AtomicU64::new(0),
            dirty: AtomicBool::new(false),
        };
        cache.load_snapshot();
        cache
    }
}

impl AnagramCache {
    /// Start building a cache over `store` with default capacity and key
    pub fn builder(store: Arc<dyn KeyValueStore>) -> AnagramCacheBuilder {
        AnagramCacheBuilder {
            store,
            capacity: CACHE_CAPACITY,
            storage_key: CACHE_STORAGE_KEY.to_string(),
            clock: Arc::new(SystemClock),
            rng: None,
        }
    }

    /// Uniformly random cached record for `level`
    ///
    /// A hit refreshes the entry's recency and access count. Lookups do not
    /// write the snapshot themselves; the updated metadata goes out with the
    /// next mutation, an explicit [`flush`](Self::flush) or on drop.
    pub fn get(&self, level: DifficultyLevel) -> Option<AnagramRecord> {
        let record =
            self.rng.with(|rng| self.entries.sample(|key, _| key.difficulty == level, rng));
        if record.is_some() {
            self.dirty.store(true, Ordering::Release);
        }
        debug!(level = level.get(), hit = record.is_some(), "cache lookup");
        record
    }

    /// Persist state not yet written, such as access metadata from hits
    ///
    /// Returns `None` when the stored snapshot is already current.
    pub fn flush(&self) -> Option<PersistOutcome> {
        if !self.dirty.load(Ordering::Acquire) {
            return None;
        }
        Some(self.persist())
    }

    /// Store `record` under (`level`, record id) and persist
    pub fn set(&self, level: DifficultyLevel, record: AnagramRecord) -> PersistOutcome {
        let key = CacheKey::new(level, record.id());
        let evicted = self.entries.insert(key, record);
        if evicted > 0 {
            debug!(evicted, "cache over capacity, evicted least recently used");
        }
        self.persist()
    }

    /// Bulk insert, each record under its own difficulty, then persist once
    pub fn preload<I>(&self, records: I) -> PreloadSummary
    where
        I: IntoIterator<Item = AnagramRecord>,
    {
        let mut loaded = 0;
        let mut evicted = 0;
        for record in records {
            evicted += self.entries.insert(record.cache_key(), record);
            loaded += 1;
        }
        let persist = self.persist();
        info!(loaded, evicted, ?persist, "preloaded anagram cache");
        PreloadSummary { loaded, evicted, persist }
    }

    /// Remove every entry, reset counters and persist the empty state
    pub fn clear(&self) -> PersistOutcome {
        self.entries.clear();
        info!("anagram cache cleared");
        self.persist()
    }

    /// Remove entries for `level` only; counters are untouched
    ///
    /// Returns the number of entries removed.
    pub fn clear_difficulty(&self, level: DifficultyLevel) -> usize {
        let removed = self.entries.retain(|key, _| key.difficulty != level);
        info!(level = level.get(), removed, "cleared difficulty level");
        if removed > 0 {
            self.persist();
        }
        removed
    }

    pub fn stats(&self) -> CacheStats {
        self.entries.stats()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cached entries for `level`
    pub fn count_for(&self, level: DifficultyLevel) -> usize {
        self.entries.entries().iter().filter(|entry| entry.key.difficulty == level).count()
    }

    /// Copies of all entries with metadata, least recently used first
    pub fn snapshot_entries(&self) -> Vec<SnapshotEntry> {
        self.entries.entries().into_iter().map(SnapshotEntry::from).collect()
    }

    /// Number of snapshot writes that were abandoned
    pub fn persistence_failures(&self) -> u64 {
        self.persistence_failures.load(Ordering::Relaxed)
    }

    fn load_snapshot(&self) {
        let raw = match self.store.read(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.storage_key, "no persisted anagram cache");
                return;
            }
            Err(error) => {
                warn!(key = %self.storage_key, %error, "failed to read persisted anagram cache");
                return;
            }
        };

        match snapshot::decode(&raw) {
            Ok(decoded) => {
                let records = decoded.entries.into_iter().map(EntryRecord::from);
                let restored = self.entries.restore(records);
                info!(restored, skipped = decoded.skipped, "restored anagram cache from snapshot");
            }
            Err(error) => {
                warn!(key = %self.storage_key, %error, "discarding malformed cache snapshot");
            }
        }
    }

    fn persist(&self) -> PersistOutcome {
        let _guard = self.persist_lock.lock();
        // Cleared before the snapshot is taken so a concurrent hit re-marks it
        self.dirty.store(false, Ordering::Release);

        match self.write_snapshot() {
            Ok(()) => PersistOutcome::Persisted,
            Err(error) if error.is_transient() => {
                let trimmed = self.entries.evict_lru();
                warn!(
                    %error,
                    trimmed = ?trimmed.map(|key| key.to_string()),
                    "snapshot write failed, retrying after evicting one entry"
                );
                match self.write_snapshot() {
                    Ok(()) => PersistOutcome::PersistedAfterTrim,
                    Err(retry_error) => self.record_failure(&retry_error),
                }
            }
            Err(error) => self.record_failure(&error),
        }
    }

    fn write_snapshot(&self) -> Result<(), StoreError> {
        let saved_at = DateTime::<Utc>::from(self.clock.system_time());
        let payload = snapshot::encode(self.entries.entries(), saved_at)
            .map_err(|err| StoreError::Backend(format!("snapshot serialization failed: {err}")))?;
        self.store.write(&self.storage_key, &payload)
    }

    fn record_failure(&self, error: &StoreError) -> PersistOutcome {
        self.dirty.store(true, Ordering::Release);
        self.persistence_failures.fetch_add(1, Ordering::Relaxed);
        warn!(%error, "anagram cache snapshot not persisted");
        PersistOutcome::Failed
    }
}

impl Drop for AnagramCache {
    fn drop(&mut self) {
        if let Some(outcome) = self.flush() {
            debug!(?outcome, "flushed anagram cache on drop");
        }
    }
}

impl std::fmt::Debug for AnagramCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnagramCache")
            .field("storage_key", &self.storage_key)
            .field("len", &self.len())
            .field("capacity", &self.entries.capacity())
            .finish_non_exhaustive()
    }
}
