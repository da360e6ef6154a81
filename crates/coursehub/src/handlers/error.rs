use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use coursehub_core::course::{service_error_to_status_code, ServiceError};

/// Message sent for failures that carry no client-facing detail.
const GENERIC_ERROR_MESSAGE: &str = "An error occurred.";

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self.0.downcast_ref::<ServiceError>() {
            Some(service_error) => {
                let code = service_error_to_status_code(service_error);
                (
                    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    service_error.public_message(),
                )
            }
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERIC_ERROR_MESSAGE.to_string(),
            ),
        };

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Request failed");
        }

        (status_code, Json(json!({ "message": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Turns a JSON body rejection into a `Validation` error.
pub fn rejection_to_validation(rejection: JsonRejection) -> ServiceError {
    ServiceError::Validation(rejection.body_text())
}
