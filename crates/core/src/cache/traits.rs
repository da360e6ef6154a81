use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations.
///
/// There is deliberately no delete: entries only leave the cache by
/// expiring.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key. Expired entries read as `None`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Releases the underlying connection.
    async fn close(&self) -> Result<()>;
}
