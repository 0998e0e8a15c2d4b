//! reqwest-based upstream client.

use async_trait::async_trait;
use relay_core::{HttpMethod, UpstreamRequest};
use tracing::{debug, warn};

use super::config::UpstreamConfig;
use super::traits::Upstream;
use crate::error::UpstreamError;

/// Forwards requests over HTTP with a shared, pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl HttpUpstream {
    /// Builds the client from the given configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| UpstreamError::InvalidConfig(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Selects the client operation for the request's verb.
    fn request_builder(&self, request: &UpstreamRequest) -> reqwest::RequestBuilder {
        let url = request.url();
        match request.method() {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Delete => self.client.delete(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Put => self.client.put(url),
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn send(&self, request: &UpstreamRequest) -> Result<String, UpstreamError> {
        let url = request.url();

        let response = self
            .request_builder(request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(url, e))?;

        let status = response.status();
        if status.is_success() {
            debug!(%request, status = status.as_u16(), "Upstream responded");
        } else {
            // El body se reenvia igual, solo se deja constancia
            warn!(%request, status = status.as_u16(), "Upstream responded with non-success status");
        }

        response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(url, e))
    }

    fn name(&self) -> &str {
        "http"
    }
}
