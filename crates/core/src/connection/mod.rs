//! Connection lifecycle seams.
//!
//! Connectors know how to open a store or cache handle; the server's
//! connection manager drives them with a [`RetryPolicy`].

mod error;
mod policy;
mod traits;
mod uri;

pub use error::{ConnectionError, Service};
pub use policy::RetryPolicy;
pub use traits::{CacheConnector, StoreConnector};
pub use uri::redact_uri;
