//! Application configuration structures
//!
//! Every field has a default, so an empty TOML or JSON document is a valid
//! configuration. Loading from files and the environment lives in the infra
//! crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CACHE_CAPACITY, CACHE_STORAGE_KEY, DATAMUSE_BASE_URL, DEFAULT_DATABASE_PATH,
    DEFAULT_LOG_LEVEL, MAX_SCRAMBLE_ATTEMPTS, MAX_STORE_VALUE_BYTES, MIN_WORD_FREQUENCY,
    SOURCE_BASE_BACKOFF_MS, SOURCE_CANDIDATE_LIMIT, SOURCE_DEADLINE_MS, SOURCE_MAX_ATTEMPTS,
    SOURCE_REQUEST_TIMEOUT_MS,
};
use crate::errors::{Result, WordForgeError};
use crate::types::AcquisitionMode;

/// Top-level configuration for WordForge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cache: CacheSettings,
    pub source: SourceSettings,
    pub scramble: ScrambleSettings,
    pub acquisition: AcquisitionSettings,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache: CacheSettings::default(),
            source: SourceSettings::default(),
            scramble: ScrambleSettings::default(),
            acquisition: AcquisitionSettings::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Reject settings that would leave a tier unusable
    ///
    /// # Errors
    /// Returns `WordForgeError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.cache.capacity == 0 {
            return Err(config_error("cache.capacity must be greater than 0"));
        }
        if self.cache.storage_key.trim().is_empty() {
            return Err(config_error("cache.storage_key must not be empty"));
        }
        if self.scramble.max_attempts == 0 {
            return Err(config_error("scramble.max_attempts must be greater than 0"));
        }
        if self.source.request_timeout_ms == 0 {
            return Err(config_error("source.request_timeout_ms must be greater than 0"));
        }
        if self.source.deadline_ms == 0 {
            return Err(config_error("source.deadline_ms must be greater than 0"));
        }
        if self.source.max_attempts == 0 {
            return Err(config_error("source.max_attempts must be greater than 0"));
        }
        if self.source.candidate_limit == 0 {
            return Err(config_error("source.candidate_limit must be greater than 0"));
        }
        if !self.source.min_frequency.is_finite() || self.source.min_frequency < 0.0 {
            return Err(config_error("source.min_frequency must be a non-negative number"));
        }
        Ok(())
    }
}

/// Eviction cache and its backing store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum entries across all difficulty levels
    pub capacity: usize,
    /// Key the snapshot is stored under
    pub storage_key: String,
    /// SQLite file path; `:memory:` selects the in-process store
    pub database_path: String,
    /// Largest snapshot the store accepts before reporting quota exhaustion
    pub max_value_bytes: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: CACHE_CAPACITY,
            storage_key: CACHE_STORAGE_KEY.to_string(),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            max_value_bytes: MAX_STORE_VALUE_BYTES,
        }
    }
}

/// External word source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub max_attempts: u32,
    pub base_backoff_ms: u64,
    /// Minimum occurrences per million words
    pub min_frequency: f64,
    pub candidate_limit: usize,
    /// Overall bound on one acquisition's source call, retries included
    pub deadline_ms: u64,
    pub enabled: bool,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: DATAMUSE_BASE_URL.to_string(),
            request_timeout_ms: SOURCE_REQUEST_TIMEOUT_MS,
            max_attempts: SOURCE_MAX_ATTEMPTS,
            base_backoff_ms: SOURCE_BASE_BACKOFF_MS,
            min_frequency: MIN_WORD_FREQUENCY,
            candidate_limit: SOURCE_CANDIDATE_LIMIT,
            deadline_ms: SOURCE_DEADLINE_MS,
            enabled: true,
        }
    }
}

impl SourceSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn base_backoff(&self) -> Duration {
        Duration::from_millis(self.base_backoff_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    /// Worst case for one request with every retry and backoff used
    ///
    /// A `deadline` shorter than this can cut off a source call that would
    /// still have succeeded.
    pub fn retry_budget(&self) -> Duration {
        let attempts = u64::from(self.max_attempts.max(1));
        let backoff: u64 = (1..attempts)
            .map(|retry| self.base_backoff_ms.saturating_mul(1 << (retry - 1).min(8)))
            .sum();
        Duration::from_millis(
            self.request_timeout_ms.saturating_mul(attempts).saturating_add(backoff),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleSettings {
    /// Shuffle attempts before falling back to rotation
    pub max_attempts: u32,
}

impl Default for ScrambleSettings {
    fn default() -> Self {
        Self { max_attempts: MAX_SCRAMBLE_ATTEMPTS }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionSettings {
    pub default_mode: AcquisitionMode,
}

fn config_error(message: &str) -> WordForgeError {
    WordForgeError::Config(message.to_string())
}
