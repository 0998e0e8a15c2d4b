//! Relay Server - caching reverse proxy over HTTP
//!
//! Every GET, POST, DELETE, PATCH and PUT request is answered from a
//! key-value cache store when possible and forwarded to a single upstream
//! host otherwise. Entries use a sliding expiration: every hit pushes the
//! deadline back by the full TTL.
//!
//! - [`CachingProxy`]: key derivation plus the cache-aside decision
//! - [`create_router`] / [`run_server`]: the axum surface
//! - [`settings`]: layered configuration (file, environment, CLI)

pub mod cache;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod proxy;
pub mod server;
pub mod settings;
pub mod state;

pub use crate::cache::{CacheAside, CacheConfig, CacheError, CacheStatus, Cached};
pub use crate::error::AppError;
pub use crate::metrics::init_metrics;
pub use crate::proxy::CachingProxy;
pub use crate::server::{create_router, run_server};
pub use crate::settings::{CliArgs, LoadError, Settings, load, load_with_cli};
pub use crate::state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
