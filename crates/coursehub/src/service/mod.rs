//! Course business logic on top of the connection manager.

mod course;

pub use course::{ConnectionStatus, CourseService, ServiceSettings};
