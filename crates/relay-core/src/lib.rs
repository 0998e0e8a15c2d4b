//! Relay Core - Domain types for the caching proxy
//!
//! This crate provides the foundational types shared by the backend and the
//! HTTP server:
//!
//! - [`HttpMethod`]: the closed set of verbs the proxy forwards
//! - [`CacheKey`]: deterministic key derived from (method, path)
//! - [`ProxyResponse`]: the text body returned to the caller
//! - [`UpstreamTarget`] / [`UpstreamRequest`]: where a miss is forwarded
//! - [`codec`]: the value format written into the cache store

pub mod codec;
pub mod error;
pub mod key;
pub mod method;
pub mod request;
pub mod response;

pub use codec::{decode, encode};
pub use error::{CodecError, MethodError, TargetError};
pub use key::CacheKey;
pub use method::HttpMethod;
pub use request::{UpstreamRequest, UpstreamTarget};
pub use response::ProxyResponse;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
