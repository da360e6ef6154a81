use std::sync::Arc;

use async_trait::async_trait;

use coursehub_core::connection::{redact_uri, StoreConnector};
use coursehub_core::storage::{CourseRepository, Result};

use super::SqliteRepository;

const URI_SCHEME: &str = "sqlite://";

/// Opens [`SqliteRepository`] handles from a `STORE_URI`.
///
/// Accepts a plain path, a `sqlite://` URI or `:memory:`.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: String,
    collection: String,
}

impl SqliteConnector {
    pub fn new(uri: &str, collection: impl Into<String>) -> Self {
        Self {
            path: database_path(uri).to_string(),
            collection: collection.into(),
        }
    }
}

fn database_path(uri: &str) -> &str {
    uri.strip_prefix(URI_SCHEME).unwrap_or(uri)
}

#[async_trait]
impl StoreConnector for SqliteConnector {
    fn describe(&self) -> String {
        format!("sqlite://{}", redact_uri(&self.path))
    }

    async fn connect(&self) -> Result<Arc<dyn CourseRepository>> {
        let repository = if self.path == ":memory:" {
            SqliteRepository::new_in_memory(self.collection.clone()).await?
        } else {
            SqliteRepository::new(&self.path, self.collection.clone()).await?
        };
        Ok(Arc::new(repository))
    }
}
