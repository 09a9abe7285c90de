//! Pure functions for serializing cached list pages to/from bytes.
//!
//! Pages are stored as JSON so cache values stay readable from `redis-cli`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::CacheError;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

impl From<SerializationError> for CacheError {
    fn from(err: SerializationError) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Serializes a page of items to JSON bytes.
pub fn serialize_page<T: Serialize>(items: &[T]) -> Result<Vec<u8>, SerializationError> {
    serde_json::to_vec(items).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a page of items.
pub fn deserialize_page<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, SerializationError> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
