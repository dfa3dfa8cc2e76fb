//! Process-wide shared cache handle
//!
//! The game loop expects exactly one logical cache per process. The first
//! caller of [`shared_cache`] builds it; later callers receive the same
//! handle. Tests call [`reset_shared_cache`] to start from a clean slate.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::debug;

use super::AnagramCache;

static SHARED: Lazy<Mutex<Option<Arc<AnagramCache>>>> = Lazy::new(|| Mutex::new(None));

/// Return the shared cache, building it with `init` on first use
pub fn shared_cache<F>(init: F) -> Arc<AnagramCache>
where
    F: FnOnce() -> AnagramCache,
{
    let mut slot = SHARED.lock();
    if let Some(cache) = slot.as_ref() {
        return Arc::clone(cache);
    }

    debug!("initializing shared anagram cache");
    let cache = Arc::new(init());
    *slot = Some(Arc::clone(&cache));
    cache
}

/// The shared cache if it has been created
pub fn try_shared_cache() -> Option<Arc<AnagramCache>> {
    SHARED.lock().clone()
}

/// Drop the shared handle so the next [`shared_cache`] call rebuilds it
///
/// Handles already held by callers stay valid.
pub fn reset_shared_cache() {
    SHARED.lock().take();
}
