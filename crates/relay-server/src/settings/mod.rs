//! Configuration layer: typed settings with layered precedence
//! (relay.toml → --config-file → environment → CLI).

use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
    time::Duration,
};

use clap::{Parser, ValueEnum};
use config::{Config, Environment, File};
use relay_backend::UpstreamConfig;
use relay_core::UpstreamTarget;
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::cache::{CacheConfig, DEFAULT_TTL_SECONDS};

mod cli;

pub use cli::CliArgs;

const LOCAL_CONFIG_BASENAME: &str = "relay";
const ENV_PREFIX: &str = "RELAY";
const DEFAULT_BIND: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPSTREAM_HOST: &str = "http://httpbin.org/";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub cache: CacheSettings,
    pub store: StoreSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct UpstreamSettings {
    pub target: UpstreamTarget,
    pub timeout: Duration,
}

impl UpstreamSettings {
    /// Client configuration for the reqwest upstream.
    pub fn client_config(&self) -> UpstreamConfig {
        UpstreamConfig::builder().timeout(self.timeout).build()
    }
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub ttl: Duration,
    pub fail_open: bool,
}

impl CacheSettings {
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.ttl,
            fail_open: self.fail_open,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub redis_url: String,
}

/// Where cache entries live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Redis => "redis",
            StoreBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown backend `{other}` (expected redis or memory)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (files → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_cli_overrides(cli);

    Settings::from_raw(raw)
}

/// Resolve configuration from the process arguments, returning both.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    upstream: RawUpstreamSettings,
    cache: RawCacheSettings,
    store: RawStoreSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(host) = cli.host.as_ref() {
            self.upstream.host = Some(host.clone());
        }
        if let Some(bind) = cli.bind {
            self.server.bind = Some(bind.to_string());
        }
        if let Some(port) = cli.port {
            self.server.port = Some(port);
        }
        if let Some(url) = cli.redis_url.as_ref() {
            self.store.redis_url = Some(url.clone());
        }
        if let Some(backend) = cli.store {
            self.store.backend = Some(backend.to_string());
        }
        if let Some(ttl) = cli.cache_ttl_seconds {
            self.cache.ttl_seconds = Some(ttl);
        }
        if let Some(fail_open) = cli.fail_open {
            self.cache.fail_open = Some(fail_open);
        }
        if let Some(level) = cli.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = cli.log_json {
            let format = if json { "json" } else { "pretty" };
            self.logging.format = Some(format.to_string());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            upstream,
            cache,
            store,
            logging,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            upstream: build_upstream_settings(upstream)?,
            cache: build_cache_settings(cache)?,
            store: build_store_settings(store)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let bind = match server.bind {
        Some(bind) => bind
            .trim()
            .parse::<IpAddr>()
            .map_err(|err| LoadError::invalid("server.bind", format!("`{bind}`: {err}")))?,
        None => DEFAULT_BIND,
    };

    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }

    Ok(ServerSettings {
        addr: SocketAddr::new(bind, port),
    })
}

fn build_upstream_settings(upstream: RawUpstreamSettings) -> Result<UpstreamSettings, LoadError> {
    let host = upstream
        .host
        .unwrap_or_else(|| DEFAULT_UPSTREAM_HOST.to_string());
    let target = UpstreamTarget::new(&host)
        .map_err(|err| LoadError::invalid("upstream.host", err.to_string()))?;

    let timeout = positive_seconds(
        upstream
            .timeout_seconds
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        "upstream.timeout_seconds",
    )?;

    Ok(UpstreamSettings { target, timeout })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, LoadError> {
    let ttl = positive_seconds(
        cache.ttl_seconds.unwrap_or(DEFAULT_TTL_SECONDS),
        "cache.ttl_seconds",
    )?;

    Ok(CacheSettings {
        ttl,
        fail_open: cache.fail_open.unwrap_or(false),
    })
}

fn build_store_settings(store: RawStoreSettings) -> Result<StoreSettings, LoadError> {
    let backend = match store.backend {
        Some(backend) => backend
            .parse::<StoreBackend>()
            .map_err(|reason: String| LoadError::invalid("store.backend", reason))?,
        None => StoreBackend::default(),
    };

    let redis_url = store
        .redis_url
        .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());
    if backend == StoreBackend::Redis && redis_url.trim().is_empty() {
        return Err(LoadError::invalid(
            "store.redis_url",
            "must not be empty when the redis backend is selected",
        ));
    }

    Ok(StoreSettings { backend, redis_url })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = match logging.format.as_deref().map(str::trim) {
        None | Some("pretty") => LogFormat::Pretty,
        Some("json") => LogFormat::Json,
        Some(other) => {
            return Err(LoadError::invalid(
                "logging.format",
                format!("unknown format `{other}` (expected pretty or json)"),
            ));
        }
    };

    Ok(LoggingSettings { level, format })
}

fn positive_seconds(value: u64, key: &'static str) -> Result<Duration, LoadError> {
    if value == 0 {
        return Err(LoadError::invalid(key, "must be greater than zero"));
    }
    Ok(Duration::from_secs(value))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    bind: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawUpstreamSettings {
    host: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    ttl_seconds: Option<u64>,
    fail_open: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawStoreSettings {
    backend: Option<String>,
    redis_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    format: Option<String>,
}
