//! Test helpers para relay-server.

#![allow(dead_code, unused_imports)]

pub mod client;
pub mod fakes;

use std::sync::Arc;

use axum::Router;
use relay_backend::{CacheStore, Upstream};
use relay_core::UpstreamTarget;
use relay_server::cache::CacheConfig;
use relay_server::metrics::setup::detached_handle;
use relay_server::{AppState, create_router};

pub use client::{TestClient, TestResponse};
pub use fakes::{DownStore, RecordingStore, ScriptedUpstream};

/// Host ficticio al que apuntan todos los tests.
pub const UPSTREAM_HOST: &str = "upstream.test";

/// Crea el router completo con los colaboradores dados.
pub fn app_with(
    store: Arc<dyn CacheStore>,
    upstream: Arc<dyn Upstream>,
    config: CacheConfig,
) -> Router {
    let target = UpstreamTarget::new(UPSTREAM_HOST).expect("valid upstream host");
    let state = AppState::new(store, upstream, target, config);
    create_router(state, detached_handle())
}

/// Crea un TestClient con la configuracion de cache por defecto.
pub fn client_with(store: Arc<dyn CacheStore>, upstream: Arc<dyn Upstream>) -> TestClient {
    TestClient::new(app_with(store, upstream, CacheConfig::default()))
}
