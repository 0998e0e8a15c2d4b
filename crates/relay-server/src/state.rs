//! Application state.

use std::sync::Arc;

use relay_backend::{CacheStore, Upstream};
use relay_core::UpstreamTarget;

use crate::cache::{CacheAside, CacheConfig};
use crate::proxy::CachingProxy;

/// Application state shared across all handlers.
///
/// Everything in it is fixed at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    proxy: Arc<CachingProxy>,
}

impl AppState {
    /// Creates a new AppState from its collaborators.
    pub fn new(
        store: Arc<dyn CacheStore>,
        upstream: Arc<dyn Upstream>,
        target: UpstreamTarget,
        config: CacheConfig,
    ) -> Self {
        let cache = CacheAside::new(store, config);
        Self {
            proxy: Arc::new(CachingProxy::new(cache, upstream, target)),
        }
    }

    /// Returns the caching proxy.
    pub fn proxy(&self) -> &CachingProxy {
        &self.proxy
    }

    /// Returns the cache store.
    pub fn store(&self) -> &dyn CacheStore {
        self.proxy.cache().store()
    }
}
