//! Cache key derivation.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::method::HttpMethod;

/// Length in hex characters of one SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// Key addressing a cached response in the store.
///
/// The key is `hex(sha256(method)) ++ hex(sha256(path))`. Each field is
/// digested on its own before concatenation, so `("GE", "Tfoo")` and
/// `("GET", "foo")` can never produce the same input to a single digest.
/// The result is always 128 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for a (method, path) pair.
    ///
    /// `path` is the unmatched remainder of the inbound URL, without the
    /// leading slash. It may be empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_core::{CacheKey, HttpMethod};
    ///
    /// let a = CacheKey::derive(HttpMethod::Get, "get");
    /// let b = CacheKey::derive(HttpMethod::Get, "get");
    /// let c = CacheKey::derive(HttpMethod::Post, "get");
    ///
    /// assert_eq!(a, b);
    /// assert_ne!(a, c);
    /// assert_eq!(a.as_str().len(), 128);
    /// ```
    pub fn derive(method: HttpMethod, path: &str) -> Self {
        Self::derive_raw(method.as_str(), path)
    }

    /// Derives a key from a raw verb string.
    ///
    /// Same algorithm as [`CacheKey::derive`]; accepts any string so the
    /// derivation can be exercised without going through [`HttpMethod`].
    pub fn derive_raw(method: &str, path: &str) -> Self {
        let mut key = String::with_capacity(DIGEST_HEX_LEN * 2);
        key.push_str(&hex::encode(Sha256::digest(method.as_bytes())));
        key.push_str(&hex::encode(Sha256::digest(path.as_bytes())));
        Self(key)
    }

    /// Returns the key as sent to the store.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the method half of the key.
    pub fn method_digest(&self) -> &str {
        &self.0[..DIGEST_HEX_LEN]
    }

    /// Returns the path half of the key.
    pub fn path_digest(&self) -> &str {
        &self.0[DIGEST_HEX_LEN..]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
