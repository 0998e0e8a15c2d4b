//! In-process cache store.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use super::traits::CacheStore;
use crate::error::StoreError;

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl MemoryEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// A [`CacheStore`] backed by a map guarded by a mutex.
///
/// Expired entries are dropped lazily when touched, and in bulk by
/// [`MemoryStore::purge_expired`]. Deadlines use tokio's clock, so a test
/// running with a paused runtime can move entries past their TTL with
/// `tokio::time::advance`.
///
/// The lock is only ever held for a map operation, never across an await
/// point, which keeps every command atomic per key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries that have not expired.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    /// Returns true if no live entry is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the remaining lifetime of `key`, if it is live.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .lock()
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.expires_at - now)
    }

    /// Removes every expired entry, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Starts a background task purging expired entries every `period`.
    ///
    /// The task holds a weak reference and stops once the store is dropped.
    pub fn spawn_purge_task(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // El primer tick es inmediato
            interval.tick().await;

            loop {
                interval.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let purged = store.purge_expired();
                if purged > 0 {
                    debug!(purged, "Purged expired cache entries");
                }
            }
        })
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        entries.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError> {
        let entry = MemoryEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().insert(key.to_string(), entry);
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                entry.expires_at = now + ttl;
                return Ok(true);
            }
            Some(_) => {}
            None => return Ok(false),
        }

        entries.remove(key);
        Ok(false)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(600);

    #[tokio::test(start_paused = true)]
    async fn test_set_and_get() {
        let store = MemoryStore::new();

        store.set("k", b"value".to_vec(), TTL).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(store.ttl("k"), Some(TTL));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_missing_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let store = MemoryStore::new();
        store.set("k", b"v".to_vec(), TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(599)).await;
        assert!(store.get("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expire_resets_to_full_window() {
        let store = MemoryStore::new();
        store.set("k", b"v".to_vec(), TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(500)).await;
        assert_eq!(store.ttl("k"), Some(Duration::from_secs(100)));

        assert!(store.expire("k", TTL).await.unwrap());
        assert_eq!(store.ttl("k"), Some(TTL));

        // Sliding expiration: sigue vivo pasado el deadline original
        tokio::time::advance(Duration::from_secs(300)).await;
        assert!(store.get("k").await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expire_on_missing_or_expired_key() {
        let store = MemoryStore::new();
        assert!(!store.expire("missing", TTL).await.unwrap());

        store.set("k", b"v".to_vec(), TTL).await.unwrap();
        tokio::time::advance(TTL).await;

        assert!(!store.expire("k", TTL).await.unwrap());
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_overwrites_value_and_ttl() {
        let store = MemoryStore::new();
        store.set("k", b"old".to_vec(), TTL).await.unwrap();
        tokio::time::advance(Duration::from_secs(200)).await;

        store.set("k", b"new".to_vec(), TTL).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(b"new".to_vec()));
        assert_eq!(store.ttl("k"), Some(TTL));
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let store = MemoryStore::new();
        store
            .set("short", b"v".to_vec(), Duration::from_secs(10))
            .await
            .unwrap();
        store.set("long", b"v".to_vec(), TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(11)).await;

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_task_stops_with_store() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("k", b"v".to_vec(), Duration::from_secs(1))
            .await
            .unwrap();

        let handle = store.spawn_purge_task(Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(store.entries.lock().len(), 0);

        drop(store);
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = MemoryStore::new();
        assert!(store.health_check().await.is_ok());
        assert_eq!(store.name(), "memory");
    }
}
