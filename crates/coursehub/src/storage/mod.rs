//! Store backend implementations.
//!
//! This module provides concrete implementations of
//! `coursehub_core::storage::CourseRepository` and their connectors.
//!
//! # Feature Flags
//!
//! - default: in-memory collection, lost on exit
//! - `sqlite`: SQLite document table using `rusqlite` and `tokio-rusqlite`
//!
//! The in-memory backend is always compiled; the feature only changes
//! which connector the server starts with.
//!
//! # Examples
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p coursehub --features sqlite
//! ```

#[cfg_attr(feature = "sqlite", allow(dead_code))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg_attr(feature = "sqlite", allow(unused_imports))]
pub use inmemory::InMemoryConnector;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteConnector;
