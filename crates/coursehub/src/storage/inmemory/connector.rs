use std::sync::Arc;

use async_trait::async_trait;

use coursehub_core::connection::StoreConnector;
use coursehub_core::storage::{CourseRepository, Result};

use super::InMemoryRepository;

/// Hands out the same in-memory repository on every connect.
///
/// Reconnecting after a restart of the connect loop sees the data written
/// through earlier handles.
#[derive(Debug, Clone)]
pub struct InMemoryConnector {
    repository: InMemoryRepository,
}

impl InMemoryConnector {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            repository: InMemoryRepository::new(collection),
        }
    }
}

#[async_trait]
impl StoreConnector for InMemoryConnector {
    fn describe(&self) -> String {
        format!("memory://{}", self.repository.collection())
    }

    async fn connect(&self) -> Result<Arc<dyn CourseRepository>> {
        Ok(Arc::new(self.repository.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursehub_core::course::NewCourse;

    #[tokio::test]
    async fn test_connections_share_data() {
        let connector = InMemoryConnector::new("test.courses");

        let first = connector.connect().await.unwrap();
        first
            .insert(NewCourse::new("CS101", "Intro", "i1"))
            .await
            .unwrap();

        let second = connector.connect().await.unwrap();
        assert_eq!(second.find_all().await.unwrap().len(), 1);
    }

    #[test]
    fn test_describe() {
        let connector = InMemoryConnector::new("learning_platform.courses");
        assert_eq!(connector.describe(), "memory://learning_platform.courses");
    }
}
