//! Pure functions for mapping service errors to HTTP status codes.

use super::ServiceError;

/// Maps a [`ServiceError`] to an HTTP status code.
///
/// - `Validation` -> 400 (Bad Request)
/// - `Conflict` -> 409 (Conflict)
/// - `NotFound` -> 404 (Not Found)
/// - `InvalidId` -> 404 (Not Found), a malformed id resolves to nothing
/// - `StoreUnavailable` / `CacheUnavailable` -> 503 (Service Unavailable)
/// - `Internal` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use coursehub_core::course::{service_error_to_status_code, ServiceError};
///
/// assert_eq!(service_error_to_status_code(&ServiceError::not_found()), 404);
/// ```
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::Validation(_) => 400,
        ServiceError::Conflict(_) => 409,
        ServiceError::NotFound(_) => 404,
        ServiceError::InvalidId(_) => 404,
        ServiceError::StoreUnavailable => 503,
        ServiceError::CacheUnavailable => 503,
        ServiceError::Internal(_) => 500,
    }
}
