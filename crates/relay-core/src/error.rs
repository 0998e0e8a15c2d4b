//! Error types for Relay domain operations.
//!
//! Key derivation never fails, so the only fallible domain operations are
//! parsing a verb and moving a [`ProxyResponse`](crate::ProxyResponse) in and
//! out of the stored value format.

use thiserror::Error;

/// Errors produced by the stored-value codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value could not be serialized.
    #[error("failed to encode cached response: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored bytes are not a valid cached response.
    #[error("failed to decode cached response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The stored value was written with a format version this build does not read.
    #[error("unsupported cache format version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the stored value
        found: u8,
        /// Version this build writes
        expected: u8,
    },
}

impl CodecError {
    /// Returns true if the stored value is unreadable and should be treated as a miss.
    pub fn is_corrupt_entry(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::UnsupportedVersion { .. })
    }
}

/// A verb outside the set the proxy forwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method '{0}'")]
pub struct MethodError(pub String);

impl MethodError {
    /// Creates a new error for the given verb.
    pub fn new(method: impl Into<String>) -> Self {
        Self(method.into())
    }

    /// Returns the rejected verb.
    pub fn method(&self) -> &str {
        &self.0
    }
}

/// The configured upstream host cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// Nothing left after removing scheme and slashes.
    #[error("upstream host cannot be empty")]
    EmptyHost,

    /// The host contains characters that cannot appear in a URL authority.
    #[error("invalid upstream host '{0}'")]
    InvalidHost(String),
}
