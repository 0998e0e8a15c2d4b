use std::fmt;

use serde::{Deserialize, Serialize};

/// Text body returned to the inbound caller.
///
/// Comes either from a decoded cache entry or from a fresh upstream fetch.
/// Upstream status codes are not tracked: a 404 page is forwarded as text
/// like any other body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyResponse {
    body: String,
}

impl ProxyResponse {
    /// Creates a response from a text body.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning the body.
    pub fn into_body(self) -> String {
        self.body
    }

    /// Returns the body length in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl From<String> for ProxyResponse {
    fn from(body: String) -> Self {
        Self::new(body)
    }
}

impl From<&str> for ProxyResponse {
    fn from(body: &str) -> Self {
        Self::new(body)
    }
}

impl fmt::Display for ProxyResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}
