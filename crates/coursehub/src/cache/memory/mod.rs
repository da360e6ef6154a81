//! In-memory cache backend implementation.
//!
//! Provides a thread-safe LRU cache with lazy TTL expiry for
//! single-instance deployments and tests.

mod cache;
mod connector;

pub use cache::MemoryCache;
pub use connector::MemoryCacheConnector;
