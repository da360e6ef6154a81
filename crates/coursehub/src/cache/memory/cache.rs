//! In-memory cache implementation with LRU eviction.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use coursehub_core::cache::{Cache, CacheError, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Expired entries are dropped lazily, on the read that finds them.
/// Clones share the same entries.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<Mutex<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            store: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Creates a cache holding at most `max_entries` entries.
    ///
    /// Fails when `max_entries` is 0.
    pub fn with_max_entries(max_entries: usize) -> Result<Self> {
        NonZeroUsize::new(max_entries)
            .map(Self::new)
            .ok_or_else(|| CacheError::ConnectionFailed("max_entries must be > 0".to_string()))
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.store.lock().await.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.lock().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                store.pop(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.lock().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.store.lock().await.clear();
        Ok(())
    }
}
