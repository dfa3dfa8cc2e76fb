//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Cache configuration
pub const CACHE_CAPACITY: usize = 200;
pub const CACHE_STORAGE_KEY: &str = "wordforge:anagram-cache:v1";
pub const SNAPSHOT_VERSION: u32 = 1;
pub const DEFAULT_DATABASE_PATH: &str = "wordforge.db";
pub const IN_MEMORY_DATABASE_PATH: &str = ":memory:";
pub const MAX_STORE_VALUE_BYTES: usize = 5 * 1024 * 1024;

// Puzzle shape
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;
pub const MIN_SOLUTION_LENGTH: usize = 3;
pub const MAX_SOLUTION_LENGTH: usize = 15;
pub const MAX_SCRAMBLE_ATTEMPTS: u32 = 10;

// External word source
pub const DATAMUSE_BASE_URL: &str = "https://api.datamuse.com";
pub const MIN_WORD_FREQUENCY: f64 = 5.0; // occurrences per million words
pub const SOURCE_REQUEST_TIMEOUT_MS: u64 = 5_000;
pub const SOURCE_MAX_ATTEMPTS: u32 = 3;
pub const SOURCE_BASE_BACKOFF_MS: u64 = 200;
pub const SOURCE_CANDIDATE_LIMIT: usize = 50;
// Lengths are queried concurrently, so one request chain bounds the call:
// 3 attempts x 5s plus backoff (200ms + 400ms), rounded up
pub const SOURCE_DEADLINE_MS: u64 = 16_000;
pub const SOURCE_CATEGORY: &str = "Open Dictionary";
pub const SOURCE_ID_PREFIX: &str = "src";
pub const CURATED_ID_PREFIX: &str = "curated";

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
