pub mod courses;
pub mod error;
pub mod health;
