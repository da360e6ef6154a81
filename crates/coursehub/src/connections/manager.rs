use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::{sync::RwLock, task::JoinHandle};

use coursehub_core::{
    cache::{Cache, CacheError},
    connection::{CacheConnector, ConnectionError, RetryPolicy, Service, StoreConnector},
    course::ServiceError,
    storage::CourseRepository,
};

use super::retry::retry_connect;

/// Owns the store and cache handles for the lifetime of the process.
///
/// Constructed once at startup and shared through `Arc`. Each handle slot
/// is set once by its connect routine and read by every request.
pub struct ConnectionManager {
    store_connector: Arc<dyn StoreConnector>,
    cache_connector: Arc<dyn CacheConnector>,
    policy: RetryPolicy,
    store: RwLock<Option<Arc<dyn CourseRepository>>>,
    cache: RwLock<Option<Arc<dyn Cache>>>,
    closed: AtomicBool,
}

impl ConnectionManager {
    pub fn new(
        store_connector: Arc<dyn StoreConnector>,
        cache_connector: Arc<dyn CacheConnector>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            store_connector,
            cache_connector,
            policy,
            store: RwLock::new(None),
            cache: RwLock::new(None),
            closed: AtomicBool::new(false),
        }
    }

    /// Connects to the store, retrying per the policy.
    ///
    /// Returns immediately when a store handle is already installed.
    pub async fn connect_store(&self) -> Result<(), ConnectionError> {
        let service = Service::Store;
        self.ensure_open(service)?;
        if self.store.read().await.is_some() {
            return Ok(());
        }

        let target = self.store_connector.describe();
        let connector = Arc::clone(&self.store_connector);
        let handle = retry_connect(service, &target, &self.policy, || {
            let connector = Arc::clone(&connector);
            async move { connector.connect().await }
        })
        .await?;

        let mut slot = self.store.write().await;
        if self.is_closed() {
            drop(slot);
            close_store_handle(handle).await;
            return Err(ConnectionError::Closed { service });
        }
        if slot.is_some() {
            drop(slot);
            tracing::debug!(%service, "Store handle already installed, closing redundant connection");
            close_store_handle(handle).await;
            return Ok(());
        }
        *slot = Some(handle);
        Ok(())
    }

    /// Connects to the cache, retrying per the policy.
    ///
    /// Returns immediately when a cache handle is already installed.
    pub async fn connect_cache(&self) -> Result<(), ConnectionError> {
        let service = Service::Cache;
        self.ensure_open(service)?;
        if self.cache.read().await.is_some() {
            return Ok(());
        }

        let target = self.cache_connector.describe();
        let connector = Arc::clone(&self.cache_connector);
        let handle = retry_connect(service, &target, &self.policy, || {
            let connector = Arc::clone(&connector);
            async move { connector.connect().await }
        })
        .await?;

        let mut slot = self.cache.write().await;
        if self.is_closed() {
            drop(slot);
            close_cache_handle(handle).await;
            return Err(ConnectionError::Closed { service });
        }
        if slot.is_some() {
            drop(slot);
            tracing::debug!(%service, "Cache handle already installed, closing redundant connection");
            close_cache_handle(handle).await;
            return Ok(());
        }
        *slot = Some(handle);
        Ok(())
    }

    /// Runs [`connect_store`](Self::connect_store) on a background task.
    pub fn spawn_connect_store(self: &Arc<Self>) -> ConnectTask {
        let manager = Arc::clone(self);
        ConnectTask::spawn(Service::Store, async move {
            manager.connect_store().await
        })
    }

    /// Runs [`connect_cache`](Self::connect_cache) on a background task.
    pub fn spawn_connect_cache(self: &Arc<Self>) -> ConnectTask {
        let manager = Arc::clone(self);
        ConnectTask::spawn(Service::Cache, async move {
            manager.connect_cache().await
        })
    }

    /// Returns the store handle, or `StoreUnavailable` when not connected.
    pub async fn store(&self) -> Result<Arc<dyn CourseRepository>, ServiceError> {
        self.store
            .read()
            .await
            .clone()
            .ok_or(ServiceError::StoreUnavailable)
    }

    /// Returns the cache handle, or `Unavailable` when not connected.
    pub async fn cache(&self) -> Result<Arc<dyn Cache>, CacheError> {
        self.cache.read().await.clone().ok_or(CacheError::Unavailable)
    }

    pub async fn is_store_connected(&self) -> bool {
        self.store.read().await.is_some()
    }

    pub async fn is_cache_connected(&self) -> bool {
        self.cache.read().await.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Closes both handles if present. Safe to call more than once.
    ///
    /// Close failures are logged and otherwise ignored. Handles that
    /// finish connecting after this call are closed on arrival.
    pub async fn close_all(&self) {
        self.closed.store(true, Ordering::SeqCst);

        let store = self.store.write().await.take();
        if let Some(store) = store {
            close_store_handle(store).await;
            tracing::info!("Store connection closed");
        }

        let cache = self.cache.write().await.take();
        if let Some(cache) = cache {
            close_cache_handle(cache).await;
            tracing::info!("Cache connection closed");
        }
    }

    fn ensure_open(&self, service: Service) -> Result<(), ConnectionError> {
        if self.is_closed() {
            return Err(ConnectionError::Closed { service });
        }
        Ok(())
    }
}

async fn close_store_handle(handle: Arc<dyn CourseRepository>) {
    if let Err(e) = handle.close().await {
        tracing::warn!(error = %e, "Failed to close store connection");
    }
}

async fn close_cache_handle(handle: Arc<dyn Cache>) {
    if let Err(e) = handle.close().await {
        tracing::warn!(error = %e, "Failed to close cache connection");
    }
}

/// A connect routine running on a background task.
///
/// Await it with [`wait`](Self::wait) or drop it to let the task finish on
/// its own; a failed connection is logged either way.
pub struct ConnectTask {
    service: Service,
    handle: JoinHandle<Result<(), ConnectionError>>,
}

impl ConnectTask {
    fn spawn<F>(service: Service, connect: F) -> Self
    where
        F: std::future::Future<Output = Result<(), ConnectionError>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let result = connect.await;
            if let Err(e) = &result {
                tracing::error!(%service, error = %e, "Connect task failed");
            }
            result
        });
        Self { service, handle }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    /// Waits for the connect routine to finish.
    pub async fn wait(self) -> Result<(), ConnectionError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(ConnectionError::Aborted {
                service: self.service,
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::{
        sync::atomic::{AtomicU32, AtomicUsize},
        time::Duration,
    };

    use async_trait::async_trait;
    use coursehub_core::{cache, storage};

    use crate::cache::memory::MemoryCache;
    use crate::storage::inmemory::InMemoryRepository;

    /// Store connector that fails a fixed number of times before connecting.
    pub struct FlakyStoreConnector {
        failures: u32,
        attempts: AtomicU32,
    }

    impl FlakyStoreConnector {
        pub fn new(failures: u32) -> Self {
            Self {
                failures,
                attempts: AtomicU32::new(0),
            }
        }

        pub fn attempts(&self) -> u32 {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StoreConnector for FlakyStoreConnector {
        fn describe(&self) -> String {
            "flaky-store".to_string()
        }

        async fn connect(&self) -> storage::Result<Arc<dyn CourseRepository>> {
            let n = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.failures {
                return Err(storage::RepositoryError::ConnectionFailed(format!(
                    "attempt {n} refused"
                )));
            }
            Ok(Arc::new(InMemoryRepository::new("test.courses")))
        }
    }

    /// Cache connector that fails a fixed number of times before connecting.
    pub struct FlakyCacheConnector {
        failures: u32,
        attempts: AtomicU32,
        failing_close: bool,
    }

    impl FlakyCacheConnector {
        pub fn new(failures: u32) -> Self {
            Self {
                failures,
                attempts: AtomicU32::new(0),
                failing_close: false,
            }
        }

        pub fn with_failing_close(mut self) -> Self {
            self.failing_close = true;
            self
        }
    }

    #[async_trait]
    impl CacheConnector for FlakyCacheConnector {
        fn describe(&self) -> String {
            "flaky-cache".to_string()
        }

        async fn connect(&self) -> cache::Result<Arc<dyn Cache>> {
            let n = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.failures {
                return Err(CacheError::ConnectionFailed(format!("attempt {n} refused")));
            }
            if self.failing_close {
                return Ok(Arc::new(FailingCloseCache::default()));
            }
            Ok(Arc::new(MemoryCache::with_max_entries(16)?))
        }
    }

    /// Cache whose close always fails; counts close calls.
    #[derive(Default)]
    pub struct FailingCloseCache {
        closes: AtomicUsize,
    }

    #[async_trait]
    impl Cache for FailingCloseCache {
        async fn get(&self, _key: &str) -> cache::Result<Option<Vec<u8>>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> cache::Result<()> {
            Ok(())
        }

        async fn close(&self) -> cache::Result<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Err(CacheError::OperationFailed("socket already closed".to_string()))
        }
    }

    pub fn fast_policy(retries: u32) -> RetryPolicy {
        RetryPolicy::fixed(retries, Duration::from_millis(1))
            .with_attempt_timeout(Duration::from_millis(100))
    }

    fn manager(store_failures: u32, cache_failures: u32, retries: u32) -> ConnectionManager {
        ConnectionManager::new(
            Arc::new(FlakyStoreConnector::new(store_failures)),
            Arc::new(FlakyCacheConnector::new(cache_failures)),
            fast_policy(retries),
        )
    }

    #[tokio::test]
    async fn test_accessors_before_connect() {
        let manager = manager(0, 0, 0);

        assert!(matches!(
            manager.store().await,
            Err(ServiceError::StoreUnavailable)
        ));
        assert!(matches!(manager.cache().await, Err(CacheError::Unavailable)));
        assert!(!manager.is_store_connected().await);
    }

    #[tokio::test]
    async fn test_connect_store_after_transient_failures() {
        let connector = Arc::new(FlakyStoreConnector::new(2));
        let manager = ConnectionManager::new(
            connector.clone(),
            Arc::new(FlakyCacheConnector::new(0)),
            fast_policy(5),
        );

        manager.connect_store().await.unwrap();

        assert_eq!(connector.attempts(), 3);
        assert!(manager.store().await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_store_exhausts_retries() {
        let manager = manager(10, 0, 2);

        let err = manager.connect_store().await.unwrap_err();

        assert!(matches!(
            err,
            ConnectionError::Exhausted {
                service: Service::Store,
                attempts: 3,
                ..
            }
        ));
        assert!(!manager.is_store_connected().await);
    }

    #[tokio::test]
    async fn test_cache_failure_uses_same_policy() {
        let manager = manager(0, 10, 1);

        let err = manager.connect_cache().await.unwrap_err();

        assert_eq!(err.service(), Service::Cache);
        assert!(matches!(err, ConnectionError::Exhausted { attempts: 2, .. }));
    }

    #[tokio::test]
    async fn test_second_connect_is_noop() {
        let connector = Arc::new(FlakyStoreConnector::new(0));
        let manager = ConnectionManager::new(
            connector.clone(),
            Arc::new(FlakyCacheConnector::new(0)),
            fast_policy(0),
        );

        manager.connect_store().await.unwrap();
        manager.connect_store().await.unwrap();

        assert_eq!(connector.attempts(), 1);
    }

    #[tokio::test]
    async fn test_spawned_connect_tasks() {
        let manager = Arc::new(manager(1, 1, 3));

        let store_task = manager.spawn_connect_store();
        let cache_task = manager.spawn_connect_cache();
        assert_eq!(store_task.service(), Service::Store);

        store_task.wait().await.unwrap();
        cache_task.wait().await.unwrap();

        assert!(manager.is_store_connected().await);
        assert!(manager.is_cache_connected().await);
    }

    #[tokio::test]
    async fn test_spawned_connect_reports_exhaustion() {
        let manager = Arc::new(manager(0, 5, 0));

        let result = manager.spawn_connect_cache().wait().await;

        assert!(matches!(
            result,
            Err(ConnectionError::Exhausted {
                service: Service::Cache,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_close_all_twice() {
        let manager = manager(0, 0, 0);
        manager.connect_store().await.unwrap();
        manager.connect_cache().await.unwrap();

        manager.close_all().await;
        manager.close_all().await;

        assert!(manager.is_closed());
        assert!(!manager.is_store_connected().await);
        assert!(!manager.is_cache_connected().await);
    }

    #[tokio::test]
    async fn test_close_all_without_connections() {
        let manager = manager(0, 0, 0);
        manager.close_all().await;
        assert!(manager.is_closed());
    }

    #[tokio::test]
    async fn test_close_errors_are_swallowed() {
        let manager = ConnectionManager::new(
            Arc::new(FlakyStoreConnector::new(0)),
            Arc::new(FlakyCacheConnector::new(0).with_failing_close()),
            fast_policy(0),
        );
        manager.connect_cache().await.unwrap();

        manager.close_all().await;

        assert!(!manager.is_cache_connected().await);
    }

    #[tokio::test]
    async fn test_connect_after_close_is_rejected() {
        let manager = manager(0, 0, 0);
        manager.close_all().await;

        let err = manager.connect_store().await.unwrap_err();

        assert_eq!(
            err,
            ConnectionError::Closed {
                service: Service::Store
            }
        );
        assert!(!manager.is_store_connected().await);
    }
}
