//! SQLite row conversion functions.
//!
//! Pure functions for converting between stored documents and domain types.

use rusqlite::Row;

use coursehub_core::course::{Course, CourseId, CoursePatch, NewCourse};
use coursehub_core::storage::RepositoryError;

/// Convert a SQLite row to a Course.
///
/// Expected columns: id, body
pub fn row_to_course(row: &Row) -> rusqlite::Result<Course> {
    let id: String = row.get(0)?;
    let body: String = row.get(1)?;

    let id = CourseId::parse(&id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let document: NewCourse = serde_json::from_str(&body).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(document.with_id(id))
}

/// Serialize a new course into a document body. The id is kept out of the body.
pub fn course_to_document(course: &NewCourse) -> Result<String, RepositoryError> {
    serde_json::to_string(course).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Serialize a patch into a JSON merge patch holding only the given fields.
pub fn patch_to_document(patch: &CoursePatch) -> Result<String, RepositoryError> {
    serde_json::to_string(patch).map_err(|e| RepositoryError::Serialization(e.to_string()))
}
