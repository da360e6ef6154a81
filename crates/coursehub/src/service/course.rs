//! Course service.
//!
//! Cache-aside on the write path only: a created course is written to the
//! store, then its snapshot is cached under `course:{id}`. Nothing updates
//! or evicts that entry afterwards, so it may lag behind the store until it
//! expires.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use coursehub_core::cache::course_key;
use coursehub_core::course::{
    Course, CourseId, CourseStats, CreateCourseRequest, FieldQuery, ServiceError,
    UpdateCourseRequest,
};
use coursehub_core::storage::CourseRepository;

use crate::cache::CacheLayer;
use crate::connections::ConnectionManager;

/// Tunables for the course service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Lifetime of the snapshot cached on create.
    pub cache_ttl: Duration,
    /// Serve single-course reads from the cache when an entry exists.
    pub cache_reads: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(3600),
            cache_reads: false,
        }
    }
}

/// Which backing services currently have a live handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub store: bool,
    pub cache: bool,
}

#[derive(Clone)]
pub struct CourseService {
    connections: Arc<ConnectionManager>,
    cache: CacheLayer,
    settings: ServiceSettings,
}

impl CourseService {
    pub fn new(connections: Arc<ConnectionManager>, settings: ServiceSettings) -> Self {
        Self {
            cache: CacheLayer::new(Arc::clone(&connections)),
            connections,
            settings,
        }
    }

    async fn store(&self) -> Result<Arc<dyn CourseRepository>, ServiceError> {
        self.connections.store().await
    }

    /// Validates and stores a new course, then caches its snapshot.
    ///
    /// A failed cache write is logged; the course is still created.
    pub async fn create_course(&self, request: CreateCourseRequest) -> Result<Course, ServiceError> {
        let new_course = request.validate()?;
        let store = self.store().await?;

        if store
            .find_by_field(&FieldQuery::title(new_course.title.as_str()))
            .await?
            .is_some()
        {
            tracing::debug!(title = %new_course.title, "Rejecting duplicate course title");
            return Err(ServiceError::duplicate_title());
        }

        let course = store.insert(new_course).await?;
        tracing::info!(course_id = %course.id, title = %course.title, "Course created");

        let key = course_key(course.id);
        if let Err(e) = self.cache.set(&key, &course, self.settings.cache_ttl).await {
            tracing::warn!(course_id = %course.id, error = %e, "Failed to cache created course");
        }

        Ok(course)
    }

    /// Looks up one course. Malformed ids fail with `InvalidId`.
    pub async fn get_course(&self, id: &str) -> Result<Course, ServiceError> {
        let id = CourseId::parse(id)?;

        if self.settings.cache_reads {
            if let Some(course) = self.cached_course(id).await {
                return Ok(course);
            }
        }

        self.store()
            .await?
            .find_by_id(id)
            .await?
            .ok_or_else(ServiceError::not_found)
    }

    /// Cache lookup for the read path. Any failure reads as a miss.
    async fn cached_course(&self, id: CourseId) -> Option<Course> {
        match self.cache.get::<Course>(&course_key(id)).await {
            Ok(Some(course)) => {
                tracing::trace!(course_id = %id, "Cache hit for course");
                Some(course)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(course_id = %id, error = %e, "Cache read failed, using store");
                None
            }
        }
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, ServiceError> {
        Ok(self.store().await?.find_all().await?)
    }

    /// Applies a partial update. The body is checked before the id.
    pub async fn update_course(
        &self,
        id: &str,
        request: UpdateCourseRequest,
    ) -> Result<Course, ServiceError> {
        let patch = request.into_patch()?;
        let id = CourseId::parse(id)?;

        let updated = self
            .store()
            .await?
            .update_by_id(id, &patch)
            .await?
            .ok_or_else(ServiceError::not_found)?;

        tracing::info!(course_id = %id, "Course updated");
        Ok(updated)
    }

    pub async fn delete_course(&self, id: &str) -> Result<(), ServiceError> {
        let id = CourseId::parse(id)?;

        if !self.store().await?.delete_by_id(id).await? {
            return Err(ServiceError::not_found());
        }

        tracing::info!(course_id = %id, "Course deleted");
        Ok(())
    }

    pub async fn course_stats(&self) -> Result<CourseStats, ServiceError> {
        Ok(self.store().await?.count_with_projection().await?)
    }

    pub async fn connection_status(&self) -> ConnectionStatus {
        ConnectionStatus {
            store: self.connections.is_store_connected().await,
            cache: self.connections.is_cache_connected().await,
        }
    }
}
