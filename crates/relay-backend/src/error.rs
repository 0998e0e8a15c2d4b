//! Error types for the cache store and the upstream client.

/// Errors returned by a [`CacheStore`](crate::CacheStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (connection refused, dropped, timed out).
    #[error("cache store unavailable: {reason}")]
    Unavailable { reason: String },

    /// The store answered but the command failed.
    #[error("cache store command {command} failed: {reason}")]
    Command {
        command: &'static str,
        reason: String,
    },

    /// Invalid store configuration (bad URL, unsupported scheme).
    #[error("invalid cache store configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Creates a new unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Creates a new command error.
    pub fn command(command: &'static str, reason: impl Into<String>) -> Self {
        Self::Command {
            command,
            reason: reason.into(),
        }
    }

    /// Classifies a Redis error raised while running `command`.
    pub fn from_redis(command: &'static str, err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            Self::unavailable(err.to_string())
        } else {
            Self::command(command, err.to_string())
        }
    }

    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Errors returned by an [`Upstream`](crate::Upstream).
///
/// An upstream that answers with a non-2xx status is not an error: its body
/// is forwarded as text like any other response.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The connection to the upstream host could not be established.
    #[error("upstream unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    /// The upstream did not answer in time.
    #[error("upstream request to {url} timed out")]
    Timeout { url: String },

    /// The response body could not be read as text.
    #[error("failed to read upstream body from {url}: {reason}")]
    Body { url: String, reason: String },

    /// Any other failure building or sending the request.
    #[error("upstream request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// The HTTP client could not be built.
    #[error("invalid upstream client configuration: {0}")]
    InvalidConfig(String),
}

impl UpstreamError {
    /// Creates a new unreachable error.
    pub fn unreachable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreachable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Classifies a reqwest error for the given URL.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            Self::unreachable(url, err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }

    /// Returns true if this is a transient error that might succeed on retry.
    ///
    /// The proxy never retries on its own; this is for callers and logs.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unreachable { .. } | Self::Timeout { .. })
    }
}
