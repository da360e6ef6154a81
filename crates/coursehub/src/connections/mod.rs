//! Store and cache connection lifecycle.
//!
//! The [`ConnectionManager`] drives the connectors from `coursehub_core`
//! through a bounded retry loop and holds the resulting handles until
//! shutdown.

mod manager;
mod retry;

pub use manager::{ConnectTask, ConnectionManager};

#[cfg(test)]
pub(crate) use manager::tests as test_support;
