//! The HTTP verbs the proxy forwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MethodError;

/// Closed set of methods accepted on the inbound surface.
///
/// Anything else is rejected by the routing layer before a cache key is ever
/// derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
    Patch,
    Put,
}

impl HttpMethod {
    /// All supported methods, in routing order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Put,
    ];

    /// Returns the canonical (uppercase) verb.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_core::HttpMethod;
    ///
    /// assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = MethodError;

    /// Parses a verb. Matching is exact: HTTP methods are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "PUT" => Ok(HttpMethod::Put),
            other => Err(MethodError::new(other)),
        }
    }
}
