//! Upstream addressing.

use std::fmt;

use crate::error::TargetError;
use crate::method::HttpMethod;

const HTTP_SCHEME: &str = "http://";
const HTTPS_SCHEME: &str = "https://";

/// The single upstream host every miss is forwarded to.
///
/// Built once at startup. The host is normalized so that it always carries a
/// scheme (`http://` is prepended when none was given) and never ends with a
/// slash; [`UpstreamTarget::url_for`] then joins it with the inbound path
/// using exactly one `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    base: String,
}

impl UpstreamTarget {
    /// Normalizes and validates a user-supplied host.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_core::UpstreamTarget;
    ///
    /// let target = UpstreamTarget::new("httpbin.org/").unwrap();
    /// assert_eq!(target.base(), "http://httpbin.org");
    /// assert_eq!(target.url_for("get"), "http://httpbin.org/get");
    /// assert_eq!(target.url_for(""), "http://httpbin.org/");
    /// ```
    pub fn new(host: impl AsRef<str>) -> Result<Self, TargetError> {
        let host = host.as_ref().trim();
        let (scheme, rest) = split_scheme(host);
        let rest = rest.trim_end_matches('/');

        if rest.is_empty() {
            return Err(TargetError::EmptyHost);
        }
        if rest.chars().any(char::is_whitespace) {
            return Err(TargetError::InvalidHost(host.to_string()));
        }

        Ok(Self {
            base: format!("{scheme}{rest}"),
        })
    }

    /// Returns the normalized host, without trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Builds the upstream URL for an inbound path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// Builds the request forwarded on a cache miss.
    pub fn request(&self, method: HttpMethod, path: &str) -> UpstreamRequest {
        UpstreamRequest {
            method,
            url: self.url_for(path),
        }
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// Splits off a leading `http://` or `https://` (any case). Hosts without
/// one get `http://`.
fn split_scheme(host: &str) -> (&str, &str) {
    for scheme in [HTTP_SCHEME, HTTPS_SCHEME] {
        if host
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        {
            return host.split_at(scheme.len());
        }
    }
    (HTTP_SCHEME, host)
}

/// A single forwarded call: one verb against one absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    method: HttpMethod,
    url: String,
}

impl UpstreamRequest {
    /// Creates a request for an already-built URL.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }

    /// Returns the verb.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the absolute URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for UpstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_http_scheme() {
        let target = UpstreamTarget::new("example.com").unwrap();
        assert_eq!(target.base(), "http://example.com");
    }

    #[test]
    fn test_keeps_existing_scheme() {
        assert_eq!(
            UpstreamTarget::new("http://example.com").unwrap().base(),
            "http://example.com"
        );
        assert_eq!(
            UpstreamTarget::new("https://example.com").unwrap().base(),
            "https://example.com"
        );
        assert_eq!(
            UpstreamTarget::new("HTTP://Example.com").unwrap().base(),
            "HTTP://Example.com"
        );
    }

    #[test]
    fn test_default_host_has_no_double_slash() {
        let target = UpstreamTarget::new("http://httpbin.org/").unwrap();

        assert_eq!(target.url_for("get"), "http://httpbin.org/get");
        assert_eq!(target.url_for("a/b/c"), "http://httpbin.org/a/b/c");
    }

    #[test]
    fn test_empty_path_ends_with_slash() {
        let target = UpstreamTarget::new("localhost:8080").unwrap();
        assert_eq!(target.url_for(""), "http://localhost:8080/");
    }

    #[test]
    fn test_rejects_empty_host() {
        assert!(matches!(UpstreamTarget::new(""), Err(TargetError::EmptyHost)));
        assert!(matches!(
            UpstreamTarget::new("http://"),
            Err(TargetError::EmptyHost)
        ));
        assert!(matches!(
            UpstreamTarget::new("  /  "),
            Err(TargetError::EmptyHost)
        ));
    }

    #[test]
    fn test_rejects_whitespace_in_host() {
        assert!(matches!(
            UpstreamTarget::new("exa mple.com"),
            Err(TargetError::InvalidHost(_))
        ));
    }

    #[test]
    fn test_request_display() {
        let target = UpstreamTarget::new("example.com").unwrap();
        let request = target.request(HttpMethod::Patch, "items/1");

        assert_eq!(request.method(), HttpMethod::Patch);
        assert_eq!(request.url(), "http://example.com/items/1");
        assert_eq!(request.to_string(), "PATCH http://example.com/items/1");
    }
}
