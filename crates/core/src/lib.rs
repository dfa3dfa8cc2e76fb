//! # WordForge Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The scrambler and the curated fallback pool
//! - The bounded, persisted anagram cache
//! - The acquisition orchestrator that sequences cache, source and curated
//!   tiers
//! - Port interfaces (traits) for the key-value store and word source
//!
//! ## Architecture Principles
//! - Only depends on `wordforge-common` and `wordforge-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Randomness and time are injected so behaviour is reproducible in tests

pub mod acquisition;
pub mod cache;
pub mod puzzle;
pub mod random;

// Infrastructure ports
pub mod storage_ports;

// Re-export specific items to avoid ambiguity
pub use acquisition::ports::{WordConstraints, WordSource, WordSourceError};
pub use acquisition::{AcquisitionError, AcquisitionService, AcquisitionStats};
pub use cache::registry::{reset_shared_cache, shared_cache, try_shared_cache};
pub use cache::{AnagramCache, AnagramCacheBuilder, PersistOutcome, PreloadSummary};
pub use puzzle::{CuratedPool, CuratedWord, Scrambler};
pub use random::RandomSource;
pub use storage_ports::{KeyValueStore, StoreError};
