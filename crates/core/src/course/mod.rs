mod error;
mod http_mapping;
mod requests;
mod types;

pub use error::{InvalidCourseId, ServiceError, DUPLICATE_TITLE_MESSAGE, NOT_FOUND_MESSAGE};
pub use http_mapping::service_error_to_status_code;
pub use requests::{CreateCourseRequest, UpdateCourseRequest};
pub use types::{Course, CourseField, CourseId, CoursePatch, CourseStats, FieldQuery, NewCourse};
