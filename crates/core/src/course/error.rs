use thiserror::Error;

use crate::cache::CacheError;
use crate::storage::RepositoryError;

/// Message returned when a create or rename collides with an existing title.
pub const DUPLICATE_TITLE_MESSAGE: &str = "A course with this title already exists.";

/// Message returned when an id does not resolve to a course.
pub const NOT_FOUND_MESSAGE: &str = "Course not found.";

/// A course id that could not be parsed into the store's native format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid course id: {0}")]
pub struct InvalidCourseId(pub String);

/// Errors surfaced by the course service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid course id: {0}")]
    InvalidId(String),
    #[error("Store is not connected")]
    StoreUnavailable,
    #[error("Cache is not connected")]
    CacheUnavailable,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found() -> Self {
        ServiceError::NotFound(NOT_FOUND_MESSAGE.to_string())
    }

    pub fn duplicate_title() -> Self {
        ServiceError::Conflict(DUPLICATE_TITLE_MESSAGE.to_string())
    }

    /// Returns the message safe to show to API clients.
    ///
    /// Internal and connectivity failures never expose their details.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::NotFound(msg) => msg.clone(),
            ServiceError::InvalidId(_) => "Invalid course id.".to_string(),
            ServiceError::StoreUnavailable | ServiceError::CacheUnavailable => {
                "Service temporarily unavailable.".to_string()
            }
            ServiceError::Internal(_) => "An error occurred.".to_string(),
        }
    }
}

impl From<InvalidCourseId> for ServiceError {
    fn from(err: InvalidCourseId) -> Self {
        ServiceError::InvalidId(err.0)
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists { .. } => ServiceError::duplicate_title(),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<CacheError> for ServiceError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Unavailable => ServiceError::CacheUnavailable,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_becomes_conflict() {
        let err = RepositoryError::AlreadyExists {
            entity_type: "Course",
            key: "CS101".to_string(),
        };
        assert_eq!(ServiceError::from(err), ServiceError::duplicate_title());
    }

    #[test]
    fn test_query_failure_becomes_internal() {
        let err = RepositoryError::QueryFailed("disk I/O error".to_string());
        assert_eq!(
            ServiceError::from(err),
            ServiceError::Internal("Query failed: disk I/O error".to_string())
        );
    }

    #[test]
    fn test_cache_unavailable_is_preserved() {
        assert_eq!(
            ServiceError::from(CacheError::Unavailable),
            ServiceError::CacheUnavailable
        );
    }

    #[test]
    fn test_public_message_hides_internal_details() {
        let err = ServiceError::Internal("connection reset by peer at 10.0.0.3".to_string());
        assert_eq!(err.public_message(), "An error occurred.");

        let err = ServiceError::InvalidId("zzz".to_string());
        assert_eq!(err.public_message(), "Invalid course id.");
    }

    #[test]
    fn test_public_message_keeps_client_errors() {
        assert_eq!(ServiceError::not_found().public_message(), "Course not found.");
        assert_eq!(
            ServiceError::duplicate_title().public_message(),
            "A course with this title already exists."
        );
    }
}
