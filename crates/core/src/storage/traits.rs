use async_trait::async_trait;

use crate::course::{Course, CourseId, CoursePatch, CourseStats, FieldQuery, NewCourse};

use super::Result;

/// Document-style repository bound to a single course collection.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Name of the collection this repository reads and writes.
    fn collection(&self) -> &str;

    /// Gets a course by its ID.
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>>;

    /// Gets the first course matching a field query.
    async fn find_by_field(&self, query: &FieldQuery) -> Result<Option<Course>>;

    /// Inserts a new course and returns it with its generated ID.
    ///
    /// Fails with `AlreadyExists` when the title is taken.
    async fn insert(&self, course: NewCourse) -> Result<Course>;

    /// Gets every course, in insertion order.
    async fn find_all(&self) -> Result<Vec<Course>>;

    /// Merges `patch` into the course and returns the stored result.
    ///
    /// Returns `None` when no course has this ID.
    async fn update_by_id(&self, id: CourseId, patch: &CoursePatch) -> Result<Option<Course>>;

    /// Deletes a course. Returns `false` when nothing was deleted.
    async fn delete_by_id(&self, id: CourseId) -> Result<bool>;

    /// Counts courses and projects their titles.
    async fn count_with_projection(&self) -> Result<CourseStats>;

    /// Releases the underlying connection.
    async fn close(&self) -> Result<()>;
}
