use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::InvalidCourseId;

/// Store-generated course identifier.
///
/// Callers treat it as opaque: it is only ever parsed from a path segment
/// and echoed back in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
    /// Generates a fresh identifier. Only store backends call this.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a raw identifier into the store's native format.
    pub fn parse(raw: &str) -> Result<Self, InvalidCourseId> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| InvalidCourseId(raw.to_string()))
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub instructor_id: String,
}

/// A validated course that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub instructor_id: String,
}

impl NewCourse {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        instructor_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            instructor_id: instructor_id.into(),
        }
    }

    /// Attaches the store-generated id.
    pub fn with_id(self, id: CourseId) -> Course {
        Course {
            id,
            title: self.title,
            description: self.description,
            instructor_id: self.instructor_id,
        }
    }
}

/// Partial update: only the `Some` fields are merged into the stored record.
///
/// Serializes without the absent fields, which makes it usable as a JSON
/// merge patch by document backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
}

impl CoursePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.instructor_id.is_none()
    }

    /// Merges the provided fields into `course`.
    pub fn apply_to(&self, course: &mut Course) {
        if let Some(title) = &self.title {
            course.title = title.clone();
        }
        if let Some(description) = &self.description {
            course.description = description.clone();
        }
        if let Some(instructor_id) = &self.instructor_id {
            course.instructor_id = instructor_id.clone();
        }
    }
}

/// Queryable course fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Title,
    Description,
    InstructorId,
}

impl CourseField {
    /// Returns the JSON path of this field inside a stored document.
    pub fn json_path(&self) -> &'static str {
        match self {
            CourseField::Title => "$.title",
            CourseField::Description => "$.description",
            CourseField::InstructorId => "$.instructorId",
        }
    }

    /// Reads this field from a course.
    pub fn value_of<'a>(&self, course: &'a Course) -> &'a str {
        match self {
            CourseField::Title => &course.title,
            CourseField::Description => &course.description,
            CourseField::InstructorId => &course.instructor_id,
        }
    }
}

/// Equality query on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldQuery {
    pub field: CourseField,
    pub value: String,
}

impl FieldQuery {
    pub fn new(field: CourseField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn title(value: impl Into<String>) -> Self {
        Self::new(CourseField::Title, value)
    }

    pub fn matches(&self, course: &Course) -> bool {
        self.field.value_of(course) == self.value
    }
}

/// Count of stored courses plus every title, in storage order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseStats {
    pub count: usize,
    #[serde(rename = "titleCourse")]
    pub title_course: Vec<String>,
}

impl CourseStats {
    pub fn from_titles(titles: Vec<String>) -> Self {
        Self {
            count: titles.len(),
            title_course: titles,
        }
    }
}
