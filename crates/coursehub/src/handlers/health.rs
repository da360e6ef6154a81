//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (store and cache handle status)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately, even while connections are still being made.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Returns 200 with `{store, cache}` when the store is connected and 503
/// otherwise. A missing cache only degrades the service.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    let status = state.courses.connection_status().await;
    let code = if status.store {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status)).into_response()
}
