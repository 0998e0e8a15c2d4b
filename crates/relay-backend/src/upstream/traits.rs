//! Upstream client trait definition.

use async_trait::async_trait;
use relay_core::UpstreamRequest;

use crate::error::UpstreamError;

/// The HTTP client used to forward a request on a cache miss.
///
/// One call, one attempt: implementations must not retry. Whatever status
/// the upstream answers with, its body is returned as text.
///
/// # Example
///
/// ```ignore
/// use relay_backend::{Upstream, UpstreamError};
/// use relay_core::UpstreamRequest;
///
/// struct Echo;
///
/// #[async_trait]
/// impl Upstream for Echo {
///     async fn send(&self, request: &UpstreamRequest) -> Result<String, UpstreamError> {
///         Ok(request.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Issues `request` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - `UpstreamError::Unreachable` if no connection could be made
    /// - `UpstreamError::Timeout` if the upstream did not answer in time
    /// - `UpstreamError::Body` if the body could not be read
    async fn send(&self, request: &UpstreamRequest) -> Result<String, UpstreamError>;

    /// Returns the name of this client, used in logs.
    fn name(&self) -> &str {
        "upstream"
    }
}
