use std::sync::Arc;

use async_trait::async_trait;

use coursehub_core::cache::{Cache, Result};
use coursehub_core::connection::CacheConnector;

use super::MemoryCache;

/// Opens a fresh in-process [`MemoryCache`] on each connect.
#[derive(Debug, Clone)]
pub struct MemoryCacheConnector {
    max_entries: usize,
}

impl MemoryCacheConnector {
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }
}

#[async_trait]
impl CacheConnector for MemoryCacheConnector {
    fn describe(&self) -> String {
        format!("memory (max_entries={})", self.max_entries)
    }

    async fn connect(&self) -> Result<Arc<dyn Cache>> {
        Ok(Arc::new(MemoryCache::with_max_entries(self.max_entries)?))
    }
}
