use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::{self, Cache};
use crate::storage::{self, CourseRepository};

/// Opens store handles. One call is one connection attempt.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// Human-readable target for logs. Must not contain credentials.
    fn describe(&self) -> String;

    async fn connect(&self) -> storage::Result<Arc<dyn CourseRepository>>;
}

/// Opens cache handles. One call is one connection attempt.
#[async_trait]
pub trait CacheConnector: Send + Sync {
    /// Human-readable target for logs. Must not contain credentials.
    fn describe(&self) -> String;

    async fn connect(&self) -> cache::Result<Arc<dyn Cache>>;
}
