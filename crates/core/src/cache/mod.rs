mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::course_key;
pub use serialization::{deserialize_value, serialize_value, SerializationError};
pub use traits::Cache;
