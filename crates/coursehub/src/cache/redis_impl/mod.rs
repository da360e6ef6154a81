//! Redis cache backend implementation.
//!
//! Provides a shared cache for multi-instance deployments, using the
//! `redis` crate's connection manager for reconnects.

mod cache;
mod connector;
mod error;

pub use cache::RedisCache;
pub use connector::RedisConnector;
