//! The caching proxy: key derivation, cache-aside and upstream forwarding.

use std::sync::Arc;
use std::time::Instant;

use relay_backend::{Upstream, UpstreamError};
use relay_core::{CacheKey, HttpMethod, ProxyResponse, UpstreamRequest, UpstreamTarget};
use tracing::{debug, warn};

use crate::cache::{CacheAside, CacheError, Cached};
use crate::metrics::upstream::{UpstreamOutcome, record_upstream_call};

/// Serves `(method, path)` from the cache, forwarding misses to the
/// configured upstream host.
#[derive(Clone)]
pub struct CachingProxy {
    cache: CacheAside,
    upstream: Arc<dyn Upstream>,
    target: UpstreamTarget,
}

impl CachingProxy {
    /// Creates a proxy forwarding misses to `target` through `upstream`.
    pub fn new(cache: CacheAside, upstream: Arc<dyn Upstream>, target: UpstreamTarget) -> Self {
        Self {
            cache,
            upstream,
            target,
        }
    }

    /// Returns the cache coordinator.
    pub fn cache(&self) -> &CacheAside {
        &self.cache
    }

    /// Returns the upstream host requests are forwarded to.
    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    /// Returns the body for `method` on `path`.
    ///
    /// `path` is the remainder of the inbound URL without its leading slash,
    /// possibly empty.
    pub async fn handle(&self, method: HttpMethod, path: &str) -> Result<Cached, CacheError> {
        let key = CacheKey::derive(method, path);
        let request = self.target.request(method, path);

        self.cache
            .get_or_fetch(&key, || self.fetch(request))
            .await
    }

    async fn fetch(&self, request: UpstreamRequest) -> Result<ProxyResponse, UpstreamError> {
        let start = Instant::now();
        let result = self.upstream.send(&request).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(body) => {
                debug!(%request, bytes = body.len(), elapsed_ms = elapsed.as_millis() as u64, "Fetched from upstream");
                record_upstream_call(request.method(), UpstreamOutcome::Success, elapsed);
            }
            Err(err) => {
                warn!(%request, error = %err, "Upstream request failed");
                record_upstream_call(request.method(), UpstreamOutcome::Failure, elapsed);
            }
        }

        result.map(ProxyResponse::new)
    }
}

impl std::fmt::Debug for CachingProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingProxy")
            .field("cache", &self.cache)
            .field("upstream", &self.upstream.name())
            .field("target", &self.target.base())
            .finish()
    }
}
