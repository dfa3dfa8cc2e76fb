//! Key-value store implementations

pub mod memory_store;
pub mod sqlite_store;

use std::sync::Arc;

use tracing::info;
use wordforge_core::KeyValueStore;
use wordforge_domain::constants::IN_MEMORY_DATABASE_PATH;
use wordforge_domain::{CacheSettings, Result};

pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

/// Open the store named by the cache settings
///
/// `:memory:` selects a process-local [`MemoryStore`]; any other path is a
/// SQLite database file.
pub fn open_store(settings: &CacheSettings) -> Result<Arc<dyn KeyValueStore>> {
    if settings.database_path == IN_MEMORY_DATABASE_PATH {
        info!(quota = settings.max_value_bytes, "using in-memory key-value store");
        return Ok(Arc::new(MemoryStore::with_quota(settings.max_value_bytes)));
    }
    let store = SqliteStore::open(&settings.database_path, settings.max_value_bytes)?;
    Ok(Arc::new(store))
}
