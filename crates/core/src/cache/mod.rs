mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{cache_tag, list_key, tag_tracking_key, Resource};
pub use serialization::{deserialize_page, serialize_page, SerializationError};
pub use traits::Cache;
