//! Shared application state.
//!
//! Backends are picked at compile time: the `sqlite` and `redis` features
//! swap the default in-memory connectors for real ones.

use std::sync::Arc;

use coursehub_core::connection::{CacheConnector, StoreConnector};

use crate::{config::Config, connections::ConnectionManager, service::CourseService};

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub connections: Arc<ConnectionManager>,
    pub courses: CourseService,
}

impl AppState {
    pub fn new(connections: Arc<ConnectionManager>, config: &Config) -> Self {
        let courses = CourseService::new(Arc::clone(&connections), config.service_settings());
        Self {
            connections,
            courses,
        }
    }

    /// Closes every backing connection.
    pub async fn shutdown(&self) {
        self.connections.close_all().await;
    }
}

/// Builds the connection manager for the configured backends.
pub fn connection_manager(config: &Config) -> Arc<ConnectionManager> {
    Arc::new(ConnectionManager::new(
        store_connector(config),
        cache_connector(config),
        config.retry_policy(),
    ))
}

#[cfg(feature = "sqlite")]
fn store_connector(config: &Config) -> Arc<dyn StoreConnector> {
    Arc::new(crate::storage::SqliteConnector::new(
        &config.store_uri,
        config.collection(),
    ))
}

#[cfg(not(feature = "sqlite"))]
fn store_connector(config: &Config) -> Arc<dyn StoreConnector> {
    Arc::new(crate::storage::InMemoryConnector::new(config.collection()))
}

#[cfg(feature = "redis")]
fn cache_connector(config: &Config) -> Arc<dyn CacheConnector> {
    Arc::new(crate::cache::RedisConnector::new(config.cache_uri.as_str()))
}

#[cfg(not(feature = "redis"))]
fn cache_connector(config: &Config) -> Arc<dyn CacheConnector> {
    Arc::new(crate::cache::MemoryCacheConnector::new(
        config.cache_max_entries,
    ))
}

/// State backed by connected in-memory store and cache.
#[cfg(test)]
pub async fn test_state(settings: crate::service::ServiceSettings) -> AppState {
    use crate::cache::MemoryCacheConnector;
    use crate::connections::test_support::fast_policy;
    use crate::storage::InMemoryConnector;

    let connections = Arc::new(ConnectionManager::new(
        Arc::new(InMemoryConnector::new("test.courses")),
        Arc::new(MemoryCacheConnector::new(100)),
        fast_policy(0),
    ));
    connections.connect_store().await.unwrap();
    connections.connect_cache().await.unwrap();

    AppState {
        courses: CourseService::new(Arc::clone(&connections), settings),
        connections,
    }
}
