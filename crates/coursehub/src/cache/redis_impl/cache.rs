//! Redis cache implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use coursehub_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
///
/// Entries with a TTL are written with `SET EX`; Redis expires them.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                // SET EX rejects 0; sub-second TTLs round up
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn close(&self) -> Result<()> {
        // The connection manager closes its socket when the last clone drops.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursehub_core::course::CourseId;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        tokio::time::timeout(Duration::from_secs(2), RedisCache::new(&redis_url()))
            .await
            .ok()?
            .ok()
    }

    /// Generate a unique test key to avoid conflicts.
    fn test_key(suffix: &str) -> String {
        format!("test:redis_cache:{}:{}", CourseId::generate(), suffix)
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("set_get");
        let value = b"hello world";

        cache
            .set(&key, value, Some(Duration::from_secs(60)))
            .await
            .unwrap();

        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, Some(value.to_vec()));
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let result = cache.get(&test_key("nonexistent")).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_redis_ttl_expiration() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("ttl");
        cache
            .set(&key, b"expires", Some(Duration::from_millis(200)))
            .await
            .unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        // Sub-second TTLs are rounded up to one second
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
    }
}
