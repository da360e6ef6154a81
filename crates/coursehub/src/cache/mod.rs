//! Cache backend implementations and the typed cache layer.
//!
//! # Feature Flags
//!
//! - default: in-process LRU cache with lazy TTL expiry
//! - `redis`: Redis cache using the redis crate
//!
//! The in-memory backend is always compiled; the feature only changes
//! which connector the server starts with.

mod layer;
#[cfg_attr(feature = "redis", allow(dead_code))]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use layer::CacheLayer;
#[cfg_attr(feature = "redis", allow(unused_imports))]
pub use memory::MemoryCacheConnector;

#[cfg(feature = "redis")]
pub use redis_impl::RedisConnector;
