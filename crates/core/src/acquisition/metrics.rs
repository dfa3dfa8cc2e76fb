//! Per-tier acquisition counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Snapshot of how acquisitions were served
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AcquisitionStats {
    pub cache_hits: u64,
    pub source_successes: u64,
    pub source_failures: u64,
    pub curated_served: u64,
}

impl AcquisitionStats {
    pub fn total_served(&self) -> u64 {
        self.cache_hits + self.source_successes + self.curated_served
    }
}

#[derive(Debug, Default)]
pub(crate) struct AcquisitionMetrics {
    cache_hits: AtomicU64,
    source_successes: AtomicU64,
    source_failures: AtomicU64,
    curated_served: AtomicU64,
}

impl AcquisitionMetrics {
    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_source_success(&self) {
        self.source_successes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_source_failure(&self) {
        self.source_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_curated(&self) {
        self.curated_served.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> AcquisitionStats {
        AcquisitionStats {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            source_successes: self.source_successes.load(Ordering::Relaxed),
            source_failures: self.source_failures.load(Ordering::Relaxed),
            curated_served: self.curated_served.load(Ordering::Relaxed),
        }
    }
}
