//! In-memory repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use coursehub_core::course::{Course, CourseId, CoursePatch, CourseStats, FieldQuery, NewCourse};
use coursehub_core::storage::{CourseRepository, RepositoryError, Result};

/// In-memory course collection.
///
/// Clones share the same underlying documents.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    collection: Arc<str>,
    documents: Arc<RwLock<Vec<Course>>>,
}

impl InMemoryRepository {
    /// Creates a new empty collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: Arc::from(collection.into()),
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

fn duplicate_title(title: &str) -> RepositoryError {
    RepositoryError::AlreadyExists {
        entity_type: "Course",
        key: title.to_string(),
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_field(&self, query: &FieldQuery) -> Result<Option<Course>> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|c| query.matches(c)).cloned())
    }

    async fn insert(&self, course: NewCourse) -> Result<Course> {
        let mut documents = self.documents.write().await;
        if documents.iter().any(|c| c.title == course.title) {
            return Err(duplicate_title(&course.title));
        }
        let course = course.with_id(CourseId::generate());
        documents.push(course.clone());
        Ok(course)
    }

    async fn find_all(&self) -> Result<Vec<Course>> {
        let documents = self.documents.read().await;
        Ok(documents.clone())
    }

    async fn update_by_id(&self, id: CourseId, patch: &CoursePatch) -> Result<Option<Course>> {
        let mut documents = self.documents.write().await;

        let Some(index) = documents.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        if let Some(title) = &patch.title {
            if documents.iter().any(|c| c.id != id && &c.title == title) {
                return Err(duplicate_title(title));
            }
        }

        let course = &mut documents[index];
        patch.apply_to(course);
        Ok(Some(course.clone()))
    }

    async fn delete_by_id(&self, id: CourseId) -> Result<bool> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|c| c.id != id);
        Ok(documents.len() < before)
    }

    async fn count_with_projection(&self) -> Result<CourseStats> {
        let documents = self.documents.read().await;
        Ok(CourseStats::from_titles(
            documents.iter().map(|c| c.title.clone()).collect(),
        ))
    }

    async fn close(&self) -> Result<()> {
        tracing::debug!(collection = %self.collection, "Closing in-memory store handle");
        Ok(())
    }
}
