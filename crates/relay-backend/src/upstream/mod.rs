//! Upstream client abstraction and the HTTP implementation.

mod config;
mod http;
mod traits;

pub use config::{UpstreamConfig, UpstreamConfigBuilder};
pub use http::HttpUpstream;
pub use traits::Upstream;
