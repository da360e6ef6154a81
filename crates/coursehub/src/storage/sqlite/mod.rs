//! SQLite document store.
//!
//! Courses are stored as JSON documents in a single `documents` table keyed
//! by collection name, using `rusqlite` for synchronous operations and
//! `tokio-rusqlite` for async wrapping. Title uniqueness is enforced by an
//! expression index over `json_extract(body, '$.title')`.

mod connector;
mod conversions;
mod error;
mod repository;
mod schema;

pub use connector::SqliteConnector;
pub use repository::SqliteRepository;
