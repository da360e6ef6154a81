use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use coursehub_core::course::{Course, CourseStats, CreateCourseRequest, UpdateCourseRequest};

use crate::{
    handlers::error::{rejection_to_validation, AppError},
    state::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseResponse {
    pub message: &'static str,
    pub updated_course: Course,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create a course (POST /api/courses).
pub async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(rejection_to_validation)?;

    let course = state.courses.create_course(request).await?;

    Ok((StatusCode::CREATED, Json(course)))
}

/// List all courses (GET /api/courses).
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.courses.list_courses().await?))
}

/// Get a single course by ID (GET /api/courses/{id}).
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(state.courses.get_course(&id).await?))
}

/// Update a course by ID (PUT /api/courses/{id}).
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<UpdateCourseResponse>, AppError> {
    let Json(request) = payload.map_err(rejection_to_validation)?;

    let updated_course = state.courses.update_course(&id, request).await?;

    Ok(Json(UpdateCourseResponse {
        message: "Course updated successfully.",
        updated_course,
    }))
}

/// Delete a course by ID (DELETE /api/courses/{id}).
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.courses.delete_course(&id).await?;

    Ok(Json(MessageResponse {
        message: "Course deleted successfully.",
    }))
}

/// Course count and titles (GET /api/courses/stats).
pub async fn course_stats(State(state): State<AppState>) -> Result<Json<CourseStats>, AppError> {
    Ok(Json(state.courses.course_stats().await?))
}
