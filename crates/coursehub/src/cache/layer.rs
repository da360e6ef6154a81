use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use coursehub_core::cache::{deserialize_value, serialize_value, Result};

use crate::connections::ConnectionManager;

/// Typed JSON view over whichever cache handle the manager holds.
///
/// Every call fails with `CacheError::Unavailable` while no cache is
/// connected.
#[derive(Clone)]
pub struct CacheLayer {
    connections: Arc<ConnectionManager>,
}

impl CacheLayer {
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }

    /// Stores `value` as JSON under `key` for `ttl`.
    pub async fn set<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let cache = self.connections.cache().await?;
        let bytes = serialize_value(value)?;
        cache.set(key, &bytes, Some(ttl)).await
    }

    /// Reads and decodes the value under `key`. Absent or expired entries
    /// read as `None`.
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let cache = self.connections.cache().await?;
        match cache.get(key).await? {
            Some(bytes) => Ok(Some(deserialize_value(&bytes)?)),
            None => Ok(None),
        }
    }
}
