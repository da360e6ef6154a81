//! Functional core for coursehub.
//!
//! Pure types, validation and the trait seams (storage, cache, connection)
//! that the server crate implements. Nothing in here performs I/O.

pub mod cache;
pub mod connection;
pub mod course;
pub mod serde;
pub mod storage;
