//! Application context - dependency injection container

use std::sync::Arc;

use wordforge_core::{
    shared_cache, AcquisitionService, AnagramCache, CuratedPool, KeyValueStore, WordSource,
};
use wordforge_domain::{AppConfig, Result};
use wordforge_infra::{open_store, DatamuseSource};

/// Type alias for key-value store port trait object
type DynKeyValueStore = dyn KeyValueStore + 'static;

/// Type alias for word source port trait object
type DynWordSource = dyn WordSource + 'static;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<DynKeyValueStore>,
    pub cache: Arc<AnagramCache>,
    pub curated: Arc<CuratedPool>,
    pub source: Arc<DynWordSource>,
    pub acquisition: Arc<AcquisitionService>,
}

impl AppContext {
    /// Create a context from the loaded configuration
    ///
    /// The cache is the process-wide shared instance.
    pub fn new_with_config(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let store = open_store(&config.cache)?;
        let cache = {
            let store = Arc::clone(&store);
            let settings = config.cache.clone();
            shared_cache(move || {
                AnagramCache::builder(store)
                    .capacity(settings.capacity)
                    .storage_key(settings.storage_key)
                    .build()
            })
        };
        Self::assemble(config, store, cache)
    }

    /// Create a context with its own cache instead of the shared one
    ///
    /// Tests use this to run several contexts side by side.
    pub fn new_isolated(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let store = open_store(&config.cache)?;
        let cache = Arc::new(
            AnagramCache::builder(Arc::clone(&store))
                .capacity(config.cache.capacity)
                .storage_key(config.cache.storage_key.clone())
                .build(),
        );
        Self::assemble(config, store, cache)
    }

    fn assemble(
        config: AppConfig,
        store: Arc<DynKeyValueStore>,
        cache: Arc<AnagramCache>,
    ) -> Result<Self> {
        let curated = Arc::new(CuratedPool::builtin());
        curated.ensure_complete()?;

        let source: Arc<DynWordSource> = Arc::new(DatamuseSource::from_settings(&config.source)?);
        if config.source.deadline() < config.source.retry_budget() {
            tracing::warn!(
                deadline_ms = config.source.deadline_ms,
                retry_budget_ms = config.source.retry_budget().as_millis() as u64,
                "source deadline is shorter than one request's retry budget"
            );
        }

        let acquisition = Arc::new(
            AcquisitionService::new(Arc::clone(&cache), Arc::clone(&source), Arc::clone(&curated))
                .with_source_settings(config.source.clone())
                .with_scramble_attempts(config.scramble.max_attempts),
        );

        tracing::info!(
            capacity = config.cache.capacity,
            cached = cache.len(),
            source_enabled = config.source.enabled,
            default_mode = %config.acquisition.default_mode,
            "application context ready"
        );

        Ok(Self { config, store, cache, curated, source, acquisition })
    }
}
