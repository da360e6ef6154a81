//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`.
//! A unique constraint hit on a course document is always a title collision.

use coursehub_core::storage::RepositoryError;

const ENTITY_TYPE: &str = "Course";

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_UNIQUE` → `RepositoryError::AlreadyExists`
/// - Open failures → `RepositoryError::ConnectionFailed`
/// - Row decoding failures → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, title: Option<&str>) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::AlreadyExists {
                entity_type: ENTITY_TYPE,
                key: title.unwrap_or("unknown").to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::FromSqlConversionFailure(..) => {
            RepositoryError::Serialization(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> RepositoryError {
    map_tokio_rusqlite_error_with_title(err, None)
}

/// Maps a tokio_rusqlite error, naming the title involved in a write.
pub fn map_tokio_rusqlite_error_with_title(
    err: tokio_rusqlite::Error,
    title: Option<&str>,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, title),
        tokio_rusqlite::Error::ConnectionClosed => {
            RepositoryError::ConnectionFailed("Connection is closed".to_string())
        }
        tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    #[test]
    fn test_unique_constraint_maps_to_already_exists() {
        let sqlite_err = rusqlite::ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code: ffi::SQLITE_CONSTRAINT_UNIQUE,
        };
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None));

        let result = map_tokio_rusqlite_error_with_title(err, Some("CS101"));

        assert_eq!(
            result,
            RepositoryError::AlreadyExists {
                entity_type: "Course",
                key: "CS101".to_string(),
            }
        );
    }

    #[test]
    fn test_closed_connection_maps_to_connection_failed() {
        let result = map_tokio_rusqlite_error(tokio_rusqlite::Error::ConnectionClosed);
        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_other_error_maps_to_query_failed() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("test error")));

        let result = map_tokio_rusqlite_error(err);

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }
}
