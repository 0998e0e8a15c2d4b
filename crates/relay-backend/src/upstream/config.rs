//! Upstream client configuration.

use std::time::Duration;

/// Configuration for [`HttpUpstream`](super::HttpUpstream).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Total time allowed for one forwarded call, body included.
    timeout: Duration,

    /// Time allowed to establish the TCP connection.
    connect_timeout: Duration,

    /// Value of the `User-Agent` header sent upstream.
    user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            user_agent: format!("relay/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl UpstreamConfig {
    /// Creates a new builder for UpstreamConfig.
    pub fn builder() -> UpstreamConfigBuilder {
        UpstreamConfigBuilder::default()
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Builder for UpstreamConfig.
#[derive(Debug, Default)]
pub struct UpstreamConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl UpstreamConfigBuilder {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the configuration, filling unset fields with defaults.
    ///
    /// The connect timeout never exceeds the overall timeout.
    pub fn build(self) -> UpstreamConfig {
        let defaults = UpstreamConfig::default();
        let timeout = self.timeout.unwrap_or(defaults.timeout);
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(defaults.connect_timeout)
            .min(timeout);

        UpstreamConfig {
            timeout,
            connect_timeout,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        }
    }
}
