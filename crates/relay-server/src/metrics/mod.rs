//! Metrics module for the Relay server.

pub mod cache;
pub mod http;
pub mod setup;
pub mod upstream;

pub use cache::CacheMetrics;
pub use setup::init_metrics;
