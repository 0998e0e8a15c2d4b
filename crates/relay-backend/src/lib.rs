//! # Relay Backend
//!
//! The two collaborators the caching proxy talks to over the network:
//!
//! - a key-value [`CacheStore`] holding encoded responses with a TTL
//!   ([`RedisStore`] in production, [`MemoryStore`] for tests and single-node
//!   setups)
//! - an [`Upstream`] HTTP client that performs the forwarded call on a miss
//!   ([`HttpUpstream`], built on reqwest)
//!
//! Both are async traits so the server can hold them as `Arc<dyn ...>` and
//! tests can swap in scripted implementations.
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use relay_backend::{CacheStore, HttpUpstream, RedisStore, Upstream, UpstreamConfig};
//! use relay_core::{HttpMethod, UpstreamTarget};
//!
//! let store = RedisStore::connect("redis://127.0.0.1:6379/").await?;
//! let upstream = HttpUpstream::new(UpstreamConfig::default())?;
//!
//! let target = UpstreamTarget::new("httpbin.org")?;
//! let body = upstream.send(&target.request(HttpMethod::Get, "get")).await?;
//! store.set("key", body.into_bytes(), Duration::from_secs(600)).await?;
//! ```

pub mod error;
pub mod store;
pub mod upstream;

// Re-exports
pub use error::{StoreError, UpstreamError};
pub use store::{CacheStore, MemoryStore, RedisStore};
pub use upstream::{HttpUpstream, Upstream, UpstreamConfig};

// Re-export relay_core for consumers
pub use relay_core;
