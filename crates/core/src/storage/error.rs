use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// Absence is not an error: lookups return `Ok(None)` and deletes
/// return `Ok(false)` when nothing matched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} already exists: {key}")]
    AlreadyExists {
        entity_type: &'static str,
        key: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
