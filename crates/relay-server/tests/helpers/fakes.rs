//! Colaboradores falsos: un upstream con guion y stores instrumentados.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use relay_backend::store::ttl_seconds;
use relay_backend::{CacheStore, MemoryStore, StoreError, Upstream, UpstreamError};
use relay_core::UpstreamRequest;

type Responder = Box<dyn Fn(&UpstreamRequest) -> Result<String, UpstreamError> + Send + Sync>;

/// Upstream que responde segun un closure y cuenta las llamadas.
pub struct ScriptedUpstream {
    responder: Responder,
    calls: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl ScriptedUpstream {
    fn with(
        responder: impl Fn(&UpstreamRequest) -> Result<String, UpstreamError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Siempre responde el mismo body.
    pub fn returning(body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::with(move |_| Ok(body.clone()))
    }

    /// Responde "METHOD url", distinto para cada request.
    pub fn echo() -> Arc<Self> {
        Self::with(|request| Ok(request.to_string()))
    }

    /// Falla si se le llama.
    pub fn failing() -> Arc<Self> {
        Self::with(|request| Err(UpstreamError::unreachable(request.url(), "scripted failure")))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests recibidos, como "METHOD url".
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Upstream for ScriptedUpstream {
    async fn send(&self, request: &UpstreamRequest) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.to_string());
        (self.responder)(request)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// MemoryStore que registra cada comando como lo veria Redis.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    commands: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    /// Comandos emitidos: "GET k", "SET k EX 600", "EXPIRE k 600".
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().clone()
    }

    pub fn clear_commands(&self) {
        self.commands.lock().clear();
    }

    fn record(&self, command: String) {
        self.commands.lock().push(command);
    }
}

#[async_trait]
impl CacheStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.record(format!("GET {key}"));
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError> {
        self.record(format!("SET {key} EX {}", ttl_seconds(ttl)));
        self.inner.set(key, value, ttl).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        self.record(format!("EXPIRE {key} {}", ttl_seconds(ttl)));
        self.inner.expire(key, ttl).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner.health_check().await
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Store caido: todas las operaciones fallan.
pub struct DownStore;

#[async_trait]
impl CacheStore for DownStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> Result<bool, StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }

    fn name(&self) -> &str {
        "down"
    }
}
