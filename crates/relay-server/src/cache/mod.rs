//! Cache-aside layer for the Relay server.
//!
//! The cache lives in an external [`CacheStore`](relay_backend::CacheStore);
//! this module only decides between serving a stored entry and fetching from
//! the upstream, and keeps the sliding expiration up to date.

pub mod coordinator;

// Re-exports
pub use coordinator::{
    CacheAside, CacheConfig, CacheError, CacheStatus, Cached, DEFAULT_TTL_SECONDS,
};
