//! Cache configuration and builder
//!
//! Only one eviction policy exists: once `max_size` is exceeded the least
//! recently used entry goes first.

/// Capacity bound and metrics switch for a [`Cache`](super::Cache)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries (None = unlimited)
    pub max_size: Option<usize>,

    /// Whether hits, misses, inserts and evictions are counted
    pub track_metrics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_size: None, track_metrics: true }
    }
}

impl CacheConfig {
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Bounded LRU cache with metrics enabled
    ///
    /// # Example
    /// ```
    /// use wordforge_common::cache::CacheConfig;
    ///
    /// let config = CacheConfig::lru(200);
    /// assert_eq!(config.max_size, Some(200));
    /// ```
    pub fn lru(max_size: usize) -> Self {
        Self { max_size: Some(max_size), ..Self::default() }
    }
}

/// Fluent builder for [`CacheConfig`]
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    pub fn max_size(mut self, size: usize) -> Self {
        self.config.max_size = Some(size);
        self
    }

    /// Drop a previously set bound
    pub fn unbounded(mut self) -> Self {
        self.config.max_size = None;
        self
    }

    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    pub fn build(self) -> CacheConfig {
        self.config
    }
}
