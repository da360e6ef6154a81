//! In-memory document store.
//!
//! Courses live in a `Vec` behind `Arc<RwLock<_>>`, which keeps insertion
//! order for listings and stats. Data is lost when the process exits.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new("learning_platform.courses");
//! ```

mod connector;
mod repository;

pub use connector::InMemoryConnector;
pub use repository::InMemoryRepository;
