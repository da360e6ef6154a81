//! Pure functions for serializing/deserializing values to/from cache bytes.
//!
//! JSON keeps cache values human-readable, which makes them easy to
//! inspect with `redis-cli GET`.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

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

/// Serializes a value to JSON bytes.
pub fn serialize_value<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SerializationError> {
    serde_json::to_vec(value).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a value.
pub fn deserialize_value<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Course, CourseId, CourseStats, NewCourse};

    #[test]
    fn test_roundtrip_course() {
        let course = NewCourse::new("CS101", "Intro", "i1").with_id(CourseId::generate());

        let bytes = serialize_value(&course).expect("serialize should succeed");
        let deserialized: Course = deserialize_value(&bytes).expect("deserialize should succeed");

        assert_eq!(course, deserialized);
    }

    #[test]
    fn test_serialized_course_is_json() {
        let course = NewCourse::new("CS101", "Intro", "i1").with_id(CourseId::generate());
        let bytes = serialize_value(&course).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["instructorId"], "i1");
    }

    #[test]
    fn test_deserialize_wrong_shape_fails() {
        let stats = CourseStats::from_titles(vec!["CS101".to_string()]);
        let bytes = serialize_value(&stats).unwrap();

        let result: Result<Course, _> = deserialize_value(&bytes);

        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_deserialize_garbage_fails() {
        let result: Result<Course, _> = deserialize_value(b"not json");
        assert!(result.is_err());
    }
}
