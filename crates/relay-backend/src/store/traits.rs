//! Cache store trait definition.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

/// A key-value store holding encoded responses with an expiration.
///
/// This is the only shared mutable resource of the proxy. The proxy takes no
/// in-process lock around it, so implementations must make each of `get`,
/// `set` and `expire` atomic for a single key. Nothing is assumed about
/// atomicity *across* calls: a hit is a `get` followed by a separate
/// `expire`.
///
/// # Implementors
///
/// - `RedisStore` - `GET`, `SET key value EX ttl`, `EXPIRE key ttl`
/// - `MemoryStore` - in-process map with lazy expiry
///
/// # Example
///
/// ```ignore
/// use relay_backend::{CacheStore, StoreError};
///
/// struct NullStore;
///
/// #[async_trait]
/// impl CacheStore for NullStore {
///     async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
///         Ok(None)
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value stored at `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `value` at `key`, replacing any previous value, expiring after `ttl`.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError>;

    /// Resets the remaining lifetime of `key` to `ttl`.
    ///
    /// # Returns
    ///
    /// `true` if the key existed and its TTL was updated, `false` if it had
    /// already expired or never existed.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, StoreError>;

    /// Verifies that the store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Returns the name of this store, used in logs and health output.
    fn name(&self) -> &str;
}

/// Converts a TTL to the whole seconds the store protocol expects.
///
/// Sub-second TTLs round up so an entry is never written already expired.
pub fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 || secs == 0 {
        secs + 1
    } else {
        secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_seconds_whole() {
        assert_eq!(ttl_seconds(Duration::from_secs(600)), 600);
    }

    #[test]
    fn test_ttl_seconds_rounds_up() {
        assert_eq!(ttl_seconds(Duration::from_millis(1500)), 2);
        assert_eq!(ttl_seconds(Duration::from_millis(1)), 1);
        assert_eq!(ttl_seconds(Duration::ZERO), 1);
    }
}
