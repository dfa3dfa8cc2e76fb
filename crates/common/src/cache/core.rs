//! Core bounded cache with least-recently-used eviction
//!
//! Entries carry wall-clock access metadata so a cache can be snapshotted
//! with [`Cache::entries`] and rebuilt elsewhere with [`Cache::restore`]
//! without losing its eviction order.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::config::CacheConfig;
use super::stats::{CacheStats, MetricsCollector};
use crate::time::{Clock, SystemClock};

/// Entry stored in the cache with metadata for eviction
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: u64,
    last_accessed: u64,
    access_count: u64,
    /// Stable ordering used when sampling
    inserted_seq: u64,
    /// Tie-breaker for entries touched within the same millisecond
    touched_seq: u64,
}

impl<V> CacheEntry<V> {
    fn touch(&mut self, now: u64, seq: u64) {
        self.last_accessed = now;
        self.touched_seq = seq;
        self.access_count += 1;
    }

    fn recency(&self) -> (u64, u64) {
        (self.last_accessed, self.touched_seq)
    }
}

/// Point-in-time copy of an entry and its access metadata
///
/// Timestamps are milliseconds since the UNIX epoch as reported by the
/// cache's [`Clock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord<K, V> {
    pub key: K,
    pub value: V,
    pub inserted_at: u64,
    pub last_accessed: u64,
    pub access_count: u64,
}

/// Internal storage for cache entries
#[derive(Debug)]
struct CacheStorage<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    next_seq: u64,
    /// Highest timestamp handed out; keeps entry timestamps monotonic even if
    /// the clock steps backwards
    high_water: u64,
}

impl<K, V> CacheStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self { entries: HashMap::new(), next_seq: 0, high_water: 0 }
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn stamp(&mut self, clock_now: u64) -> u64 {
        self.high_water = self.high_water.max(clock_now);
        self.high_water
    }

    fn least_recently_used(&self) -> Option<K> {
        self.entries.iter().min_by_key(|(_, entry)| entry.recency()).map(|(key, _)| key.clone())
    }
}

/// Generic thread-safe cache with LRU eviction
///
/// # Type Parameters
/// - `K`: Key type (must be `Eq + Hash + Clone`)
/// - `V`: Value type (must be `Clone`)
/// - `C`: Clock used for access timestamps (defaults to `SystemClock`)
///
/// # Example
/// ```
/// use wordforge_common::cache::{Cache, CacheConfig};
///
/// let cache: Cache<String, i32> = Cache::new(CacheConfig::lru(2));
/// cache.insert("a".to_string(), 1);
/// cache.insert("b".to_string(), 2);
/// let _ = cache.get(&"a".to_string());
/// cache.insert("c".to_string(), 3); // evicts "b"
/// assert_eq!(cache.get(&"b".to_string()), None);
/// ```
pub struct Cache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    storage: Arc<RwLock<CacheStorage<K, V>>>,
    config: CacheConfig,
    metrics: MetricsCollector,
    clock: C,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new cache with the given configuration using system clock
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Create a new cache with a custom clock (useful for testing)
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            storage: Arc::new(RwLock::new(CacheStorage::new())),
            config,
            metrics: MetricsCollector::new(),
            clock,
        }
    }

    /// Insert a value into the cache
    ///
    /// A value already stored under `key` is replaced by a fresh entry. If
    /// the cache then holds more than `max_size` entries, least recently
    /// used entries are evicted until it is back at capacity.
    ///
    /// Returns the number of entries evicted.
    pub fn insert(&self, key: K, value: V) -> usize {
        let mut storage = self.storage.write();
        let now = storage.stamp(self.clock.millis_since_epoch());
        let seq = storage.next_seq();

        storage.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
                last_accessed: now,
                access_count: 0,
                inserted_seq: seq,
                touched_seq: seq,
            },
        );

        if self.config.track_metrics {
            self.metrics.record_insert();
        }

        self.enforce_capacity(&mut storage)
    }

    /// Get a value from the cache, refreshing its recency
    pub fn get(&self, key: &K) -> Option<V> {
        let mut storage = self.storage.write();
        let now = storage.stamp(self.clock.millis_since_epoch());
        let seq = storage.next_seq();

        let value = storage.entries.get_mut(key).map(|entry| {
            entry.touch(now, seq);
            entry.value.clone()
        });
        self.record_lookup(value.is_some());
        value
    }

    /// Read a value without touching access metadata or metrics
    pub fn peek(&self, key: &K) -> Option<V> {
        self.storage.read().entries.get(key).map(|entry| entry.value.clone())
    }

    /// Check whether `key` is present without touching it
    pub fn contains_key(&self, key: &K) -> bool {
        self.storage.read().entries.contains_key(key)
    }

    /// Pick one entry uniformly at random among those matching `predicate`
    ///
    /// The chosen entry is touched exactly like [`Cache::get`] and counts as
    /// a hit; finding no matching entry counts as a miss. Candidates are
    /// ordered by insertion before sampling so a seeded `rng` yields a
    /// reproducible choice.
    pub fn sample<F, R>(&self, predicate: F, rng: &mut R) -> Option<V>
    where
        F: Fn(&K, &V) -> bool,
        R: Rng + ?Sized,
    {
        let mut storage = self.storage.write();

        let chosen = {
            let mut candidates: Vec<(u64, &K)> = storage
                .entries
                .iter()
                .filter(|(key, entry)| predicate(key, &entry.value))
                .map(|(key, entry)| (entry.inserted_seq, key))
                .collect();
            candidates.sort_unstable_by_key(|(seq, _)| *seq);
            candidates.choose(rng).map(|(_, key)| (*key).clone())
        };

        let value = match chosen {
            Some(key) => {
                let now = storage.stamp(self.clock.millis_since_epoch());
                let seq = storage.next_seq();
                storage.entries.get_mut(&key).map(|entry| {
                    entry.touch(now, seq);
                    entry.value.clone()
                })
            }
            None => None,
        };

        self.record_lookup(value.is_some());
        value
    }

    /// Keep only the entries for which `keep` returns true
    ///
    /// Removed entries are not counted as evictions. Returns the number of
    /// entries removed.
    pub fn retain<F>(&self, mut keep: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut storage = self.storage.write();
        let before = storage.entries.len();
        storage.entries.retain(|key, entry| keep(key, &entry.value));
        before - storage.entries.len()
    }

    /// Evict the least recently used entry, counting it as an eviction
    pub fn evict_lru(&self) -> Option<K> {
        let mut storage = self.storage.write();
        self.evict_one(&mut storage)
    }

    /// Clear all entries and reset metrics
    pub fn clear(&self) {
        self.storage.write().entries.clear();

        if self.config.track_metrics {
            self.metrics.reset();
        }
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.storage.read().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured maximum number of entries
    pub fn capacity(&self) -> Option<usize> {
        self.config.max_size
    }

    /// Copy every entry with its metadata, least recently used first
    pub fn entries(&self) -> Vec<EntryRecord<K, V>> {
        let storage = self.storage.read();
        let mut ordered: Vec<(&K, &CacheEntry<V>)> = storage.entries.iter().collect();
        ordered.sort_unstable_by_key(|(_, entry)| entry.recency());

        ordered
            .into_iter()
            .map(|(key, entry)| EntryRecord {
                key: key.clone(),
                value: entry.value.clone(),
                inserted_at: entry.inserted_at,
                last_accessed: entry.last_accessed,
                access_count: entry.access_count,
            })
            .collect()
    }

    /// Replace the cache contents with previously captured entries
    ///
    /// Metrics are left untouched. When more records than `max_size` are
    /// supplied, the most recently accessed ones are kept and the rest are
    /// dropped without being counted as evictions. Returns the number of
    /// entries now stored.
    pub fn restore<I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = EntryRecord<K, V>>,
    {
        let mut records: Vec<EntryRecord<K, V>> = records.into_iter().collect();
        records.sort_by_key(|record| record.last_accessed);

        if let Some(max_size) = self.config.max_size {
            let overflow = records.len().saturating_sub(max_size);
            records.drain(..overflow);
        }

        let mut storage = self.storage.write();
        storage.entries.clear();

        for record in records {
            let seq = storage.next_seq();
            storage.high_water = storage.high_water.max(record.last_accessed);
            storage.entries.insert(
                record.key,
                CacheEntry {
                    value: record.value,
                    inserted_at: record.inserted_at,
                    last_accessed: record.last_accessed,
                    access_count: record.access_count,
                    inserted_seq: seq,
                    touched_seq: seq,
                },
            );
        }

        storage.entries.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len(), self.config.max_size)
    }

    fn enforce_capacity(&self, storage: &mut CacheStorage<K, V>) -> usize {
        let Some(max_size) = self.config.max_size else {
            return 0;
        };

        let mut evicted = 0;
        while storage.entries.len() > max_size {
            if self.evict_one(storage).is_none() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    fn evict_one(&self, storage: &mut CacheStorage<K, V>) -> Option<K> {
        let key = storage.least_recently_used()?;
        storage.entries.remove(&key);
        trace!(remaining = storage.entries.len(), "evicted least recently used cache entry");

        if self.config.track_metrics {
            self.metrics.record_eviction();
        }
        Some(key)
    }

    fn record_lookup(&self, hit: bool) {
        if !self.config.track_metrics {
            return;
        }
        if hit {
            self.metrics.record_hit();
        } else {
            self.metrics.record_miss();
        }
    }
}

impl<K, V, C> Clone for Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
            clock: self.clock.clone(),
        }
    }
}
