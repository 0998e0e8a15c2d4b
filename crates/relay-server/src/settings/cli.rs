use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, ValueHint, builder::BoolishValueParser};

use super::StoreBackend;

/// Command-line arguments for the relay binary.
///
/// Every flag is optional; when given it overrides the same key from the
/// configuration file and the environment.
#[derive(Debug, Parser, Default, Clone)]
#[command(name = "relay-server", version, about = "Caching reverse proxy")]
pub struct CliArgs {
    /// Upstream host requests are forwarded to on a cache miss.
    #[arg(long, value_name = "URL", value_hint = ValueHint::Url)]
    pub host: Option<String>,

    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "RELAY_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    /// Override the listener address.
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<IpAddr>,

    /// Override the listener port.
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Override the Redis connection URL.
    #[arg(long = "redis-url", value_name = "URL", value_hint = ValueHint::Url)]
    pub redis_url: Option<String>,

    /// Cache store backend.
    #[arg(long, value_enum, value_name = "BACKEND")]
    pub store: Option<StoreBackend>,

    /// Override the entry TTL in seconds.
    #[arg(long = "cache-ttl", value_name = "SECONDS")]
    pub cache_ttl_seconds: Option<u64>,

    /// Keep serving from the upstream when the cache store fails.
    #[arg(
        long = "fail-open",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub fail_open: Option<bool>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}
