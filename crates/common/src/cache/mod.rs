//! Bounded in-memory cache with least-recently-used eviction
//!
//! # Features
//!
//! - **Thread-safe**: storage sits behind a `parking_lot::RwLock`, so handles
//!   can be cloned or wrapped in `Arc` and shared freely
//! - **Generic**: works with any `K: Eq + Hash + Clone` and `V: Clone`
//! - **Wall-clock metadata**: every entry records insertion time, last access
//!   and access count through a pluggable [`Clock`](crate::time::Clock)
//! - **Snapshots**: [`Cache::entries`] and [`Cache::restore`] move a cache
//!   between processes without losing its eviction order
//! - **Metrics**: optional hit/miss/insert/eviction counters
//!
//! # Examples
//!
//! ## Simple LRU Cache
//! ```
//! use wordforge_common::cache::{Cache, CacheConfig};
//!
//! let cache: Cache<String, i32> = Cache::new(CacheConfig::lru(100));
//! cache.insert("key".to_string(), 42);
//! assert_eq!(cache.get(&"key".to_string()), Some(42));
//! ```
//!
//! ## Random Sampling by Predicate
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use wordforge_common::cache::{Cache, CacheConfig};
//!
//! let cache: Cache<(u8, String), &str> = Cache::new(CacheConfig::lru(10));
//! cache.insert((1, "a".into()), "CRANE");
//! cache.insert((2, "b".into()), "MANGO");
//!
//! let mut rng = StdRng::seed_from_u64(9);
//! assert_eq!(cache.sample(|(level, _), _| *level == 2, &mut rng), Some("MANGO"));
//! ```
//!
//! ## Cache Statistics
//! ```
//! use wordforge_common::cache::{Cache, CacheConfig};
//!
//! let config = CacheConfig::builder().max_size(100).track_metrics(true).build();
//! let cache: Cache<String, i32> = Cache::new(config);
//!
//! cache.insert("key1".to_string(), 1);
//! let _ = cache.get(&"key1".to_string());
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! println!("Cache size: {}/{:?}", stats.size, stats.max_size);
//! ```

mod config;
mod core;
mod stats;

// Re-export public API
pub use core::{Cache, EntryRecord};

pub use config::{CacheConfig, CacheConfigBuilder};
pub use stats::CacheStats;
