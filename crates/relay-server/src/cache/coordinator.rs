//! Cache-aside coordinator with sliding expiration.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use relay_backend::{CacheStore, StoreError, UpstreamError};
use relay_core::{CacheKey, CodecError, ProxyResponse, decode, encode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics::CacheMetrics;

/// TTL por defecto de cada entrada (10 minutos).
pub const DEFAULT_TTL_SECONDS: u64 = 600;

/// Error del sistema de cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// El store fallo y la degradacion no esta habilitada
    #[error(transparent)]
    Store(#[from] StoreError),

    /// El upstream fallo durante un miss
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// La respuesta no se pudo serializar para guardarla
    #[error(transparent)]
    Encode(#[from] CodecError),
}

/// Configuracion del cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL aplicado en cada SET y renovado en cada hit (default: 600s)
    pub ttl: Duration,
    /// Si es true, los fallos del store se registran y se tratan como miss
    pub fail_open: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_TTL_SECONDS),
            fail_open: false,
        }
    }
}

/// Origen de una respuesta servida por el proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Valor del header `x-relay-cache`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
        }
    }
}

/// Respuesta junto con su origen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached {
    pub response: ProxyResponse,
    pub status: CacheStatus,
}

impl Cached {
    fn hit(response: ProxyResponse) -> Self {
        Self {
            response,
            status: CacheStatus::Hit,
        }
    }

    fn miss(response: ProxyResponse) -> Self {
        Self {
            response,
            status: CacheStatus::Miss,
        }
    }

    /// Returns true when the response came from the store.
    pub fn is_hit(&self) -> bool {
        self.status == CacheStatus::Hit
    }
}

/// Cache-aside sobre un store externo.
///
/// No guarda estado propio: toda entrada vive en el store, y no se toma ningun
/// lock en proceso. Dos misses concurrentes para la misma key hacen fetch los
/// dos y el ultimo SET gana.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use relay_backend::{MemoryStore, UpstreamError};
/// use relay_core::{CacheKey, HttpMethod, ProxyResponse};
/// use relay_server::cache::{CacheAside, CacheConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), relay_server::cache::CacheError> {
/// let cache = CacheAside::new(Arc::new(MemoryStore::new()), CacheConfig::default());
/// let key = CacheKey::derive(HttpMethod::Get, "get");
///
/// let cached = cache
///     .get_or_fetch(&key, || async { Ok::<_, UpstreamError>(ProxyResponse::new("body")) })
///     .await?;
/// assert!(!cached.is_hit());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
    metrics: CacheMetrics,
}

impl CacheAside {
    /// Crea un coordinador sobre el store dado.
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self {
            store,
            config,
            metrics: CacheMetrics::new(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &dyn CacheStore {
        self.store.as_ref()
    }

    /// Returns the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the metrics recorder.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Sirve `key` desde el store o la obtiene con `fetch` y la guarda.
    ///
    /// - Hit: `GET`, luego `EXPIRE key ttl` (sliding expiration), luego decode.
    /// - Miss: `fetch`, encode, `SET key value EX ttl`.
    ///
    /// Una entrada que no se puede decodificar se trata como miss y se
    /// sobrescribe. El SET solo ocurre despues de un fetch completo, asi que
    /// cancelar el future nunca deja una entrada parcial.
    pub async fn get_or_fetch<F, Fut>(&self, key: &CacheKey, fetch: F) -> Result<Cached, CacheError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ProxyResponse, UpstreamError>>,
    {
        let start = Instant::now();

        if let Some(response) = self.lookup(key).await? {
            self.metrics.record_hit();
            self.metrics
                .record_operation_duration("hit", start.elapsed());
            debug!(%key, "Cache hit");
            return Ok(Cached::hit(response));
        }

        self.metrics.record_miss();
        debug!(%key, "Cache miss");

        let response = fetch().await?;
        self.populate(key, &response).await?;

        self.metrics
            .record_operation_duration("miss", start.elapsed());

        Ok(Cached::miss(response))
    }

    /// Lee y renueva una entrada. `None` si no existe o no se pudo leer.
    async fn lookup(&self, key: &CacheKey) -> Result<Option<ProxyResponse>, CacheError> {
        let bytes = match self.store.get(key.as_str()).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(None),
            Err(err) => {
                self.store_failure("get", key, err)?;
                return Ok(None);
            }
        };

        match self.store.expire(key.as_str(), self.config.ttl).await {
            Ok(true) => {}
            // Expiro entre el GET y el EXPIRE; el valor leido sigue siendo valido
            Ok(false) => debug!(%key, "Entry expired before its TTL was refreshed"),
            Err(err) => self.store_failure("expire", key, err)?,
        }

        match decode(&bytes) {
            Ok(response) => Ok(Some(response)),
            Err(err) => {
                warn!(%key, error = %err, "Discarding unreadable cache entry");
                self.metrics.record_decode_failure();
                Ok(None)
            }
        }
    }

    /// Guarda la respuesta con el TTL completo.
    async fn populate(&self, key: &CacheKey, response: &ProxyResponse) -> Result<(), CacheError> {
        let value = encode(response)?;

        match self.store.set(key.as_str(), value, self.config.ttl).await {
            Ok(()) => Ok(()),
            Err(err) => self.store_failure("set", key, err),
        }
    }

    fn store_failure(
        &self,
        operation: &'static str,
        key: &CacheKey,
        err: StoreError,
    ) -> Result<(), CacheError> {
        self.metrics.record_store_error(operation);

        if self.config.fail_open {
            warn!(%key, operation, error = %err, "Cache store failed, continuing without cache");
            Ok(())
        } else {
            Err(CacheError::Store(err))
        }
    }
}

impl std::fmt::Debug for CacheAside {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheAside")
            .field("store", &self.store.name())
            .field("config", &self.config)
            .finish()
    }
}
