//! API request types for course operations.
//!
//! Every field is optional at the wire level so that missing fields turn
//! into a `Validation` error with a readable message instead of a
//! deserialization rejection.

use serde::{Deserialize, Serialize};

use crate::serde::deserialize_optional_string;

use super::{CoursePatch, NewCourse, ServiceError};

/// Request payload for creating a new course.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub instructor_id: Option<String>,
}

impl CreateCourseRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        instructor_id: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            instructor_id: Some(instructor_id.into()),
        }
    }

    /// Checks that all three fields are present.
    pub fn validate(self) -> Result<NewCourse, ServiceError> {
        match (self.title, self.description, self.instructor_id) {
            (Some(title), Some(description), Some(instructor_id)) => Ok(NewCourse {
                title,
                description,
                instructor_id,
            }),
            _ => Err(ServiceError::Validation(
                "Title, description, and instructor are required".to_string(),
            )),
        }
    }
}

/// Request payload for updating a course. Any subset of fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub instructor_id: Option<String>,
}

impl UpdateCourseRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_instructor_id(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }

    /// Converts the request into a patch, rejecting an empty update.
    pub fn into_patch(self) -> Result<CoursePatch, ServiceError> {
        let patch = CoursePatch {
            title: self.title,
            description: self.description,
            instructor_id: self.instructor_id,
        };
        if patch.is_empty() {
            return Err(ServiceError::Validation(
                "At least one field is required for update.".to_string(),
            ));
        }
        Ok(patch)
    }
}
