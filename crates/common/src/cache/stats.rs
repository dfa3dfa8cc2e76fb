//! Cache counters and the stats snapshot built from them
//!
//! Counters live behind one `Arc` shared by every clone of a cache, so a
//! snapshot taken from any handle reflects every access.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Point-in-time view of a cache's size and counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Entries held when the snapshot was taken
    pub size: usize,

    /// Capacity bound, `None` when unbounded
    pub max_size: Option<usize>,

    /// Lookups that returned an entry
    pub hits: u64,

    /// Lookups that found nothing
    pub misses: u64,

    /// Insert operations, replacements included
    pub inserts: u64,

    /// Entries removed to honour the capacity bound
    pub evictions: u64,
}

impl CacheStats {
    /// Lookups of any outcome
    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, 0 when nothing was looked up
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.total_accesses())
    }

    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses, self.total_accesses())
    }

    /// `size / max_size`, `None` for unbounded caches
    pub fn fill_percentage(&self) -> Option<f64> {
        self.max_size.map(|max| ratio(self.size as u64, max as u64))
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
}

/// Lock-free counters shared by all clones of one cache
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricsCollector {
    counters: Arc<Counters>,
}

impl MetricsCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.counters.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insert(&self) {
        self.counters.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.counters.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, size: usize, max_size: Option<usize>) -> CacheStats {
        let c = &self.counters;
        CacheStats {
            size,
            max_size,
            hits: c.hits.load(Ordering::Relaxed),
            misses: c.misses.load(Ordering::Relaxed),
            inserts: c.inserts.load(Ordering::Relaxed),
            evictions: c.evictions.load(Ordering::Relaxed),
        }
    }

    /// Zero every counter
    pub(crate) fn reset(&self) {
        let c = &self.counters;
        for counter in [&c.hits, &c.misses, &c.inserts, &c.evictions] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
