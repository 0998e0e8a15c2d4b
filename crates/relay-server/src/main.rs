//! Relay server binary.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use relay_backend::{CacheStore, HttpUpstream, MemoryStore, RedisStore};
use relay_server::settings::{LogFormat, LoggingSettings, Settings, StoreBackend};
use relay_server::{AppState, init_metrics, load_with_cli, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Cada cuanto se purgan las entradas vencidas del store en memoria.
const MEMORY_PURGE_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (_cli, settings) = load_with_cli().context("failed to load configuration")?;

    init_tracing(&settings.logging);

    let prometheus = init_metrics().context("failed to install metrics recorder")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        upstream = %settings.upstream.target,
        store = %settings.store.backend,
        ttl_seconds = settings.cache.ttl.as_secs(),
        fail_open = settings.cache.fail_open,
        "Starting relay server"
    );

    let store = build_store(&settings).await?;
    let upstream = HttpUpstream::new(settings.upstream.client_config())
        .context("failed to build upstream client")?;

    let state = AppState::new(
        store,
        Arc::new(upstream),
        settings.upstream.target.clone(),
        settings.cache.cache_config(),
    );

    run_server(settings.server.addr, state, prometheus)
        .await
        .with_context(|| format!("server failed on {}", settings.server.addr))?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG tiene prioridad sobre el nivel configurado
    let filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn build_store(settings: &Settings) -> anyhow::Result<Arc<dyn CacheStore>> {
    match settings.store.backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(&settings.store.redis_url)
                .await
                .context("failed to connect to the Redis cache store")?;
            tracing::info!(url = %store.url(), "Connected to Redis");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = Arc::new(MemoryStore::new());
            store.spawn_purge_task(MEMORY_PURGE_PERIOD);
            tracing::warn!("Using the in-memory store; entries are lost on restart");
            Ok(store)
        }
    }
}
