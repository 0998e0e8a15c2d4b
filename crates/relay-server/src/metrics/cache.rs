//! Cache metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Registra las metricas de cache.
/// Llamar una vez al inicio para registrar las metricas.
pub fn register_cache_metrics() {
    // Describir metricas
    metrics::describe_counter!("relay_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!("relay_cache_misses_total", "Total number of cache misses");
    metrics::describe_counter!(
        "relay_cache_decode_failures_total",
        "Cache entries that could not be decoded and were refetched"
    );
    metrics::describe_counter!(
        "relay_cache_store_errors_total",
        "Failed cache store commands, by operation"
    );
    metrics::describe_gauge!(
        "relay_cache_hit_ratio",
        "Hit ratio observed by this process since startup"
    );
    metrics::describe_histogram!(
        "relay_cache_operation_seconds",
        "Time spent serving a request through the cache"
    );
}

/// Recorder de metricas de cache.
/// Usa atomic counters internos para calcular el hit rate sin leer el exporter.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    decode_failures: Arc<AtomicU64>,
    store_errors: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self {
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            decode_failures: Arc::new(AtomicU64::new(0)),
            store_errors: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Registra un cache hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("relay_cache_hits_total").increment(1);
        self.update_hit_ratio();
    }

    /// Registra un cache miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("relay_cache_misses_total").increment(1);
        self.update_hit_ratio();
    }

    /// Registra una entrada ilegible (se trata como miss)
    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
        counter!("relay_cache_decode_failures_total").increment(1);
    }

    /// Registra un fallo del store para la operacion dada
    pub fn record_store_error(&self, operation: &'static str) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
        counter!("relay_cache_store_errors_total", "op" => operation).increment(1);
    }

    /// Registra la duracion de una operacion
    pub fn record_operation_duration(&self, operation: &'static str, duration: Duration) {
        histogram!("relay_cache_operation_seconds", "operation" => operation)
            .record(duration.as_secs_f64());
    }

    fn update_hit_ratio(&self) {
        gauge!("relay_cache_hit_ratio").set(self.hit_rate());
    }

    /// Calcula hit rate (para logging/debugging)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let misses = self.misses.load(Ordering::Relaxed) as f64;
        let total = hits + misses;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    /// Retorna el numero de hits
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Retorna el numero de misses
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Retorna el numero de entradas ilegibles
    pub fn decode_failures(&self) -> u64 {
        self.decode_failures.load(Ordering::Relaxed)
    }

    /// Retorna el numero de fallos del store
    pub fn store_errors(&self) -> u64 {
        self.store_errors.load(Ordering::Relaxed)
    }
}

impl Default for CacheMetrics {
    fn default() -> Self {
        Self::new()
    }
}
