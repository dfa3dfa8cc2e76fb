//! Bounded anagram cache persisted through a key-value store
//!
//! Entries are keyed by (difficulty level, record id) and evicted
//! least-recently-used first once the configured capacity is exceeded. The
//! whole cache is written as one JSON snapshot after each mutation and read
//! back when a cache is built.

pub mod registry;
mod service;
pub mod snapshot;

pub use service::{AnagramCache, AnagramCacheBuilder, PersistOutcome, PreloadSummary};
