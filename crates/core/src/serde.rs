//! Serde helper functions for request deserialization.
//!
//! Course payloads treat empty or whitespace-only strings the same as a
//! missing field, so `{"title": ""}` fails validation exactly like `{}`.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test struct that uses the deserializer function
    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
    }

    #[test]
    fn test_deserialize_optional_string_empty() {
        let json = r#"{"string_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_whitespace() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "hello"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("hello".to_string()));
    }

    #[test]
    fn test_deserialize_optional_string_null() {
        let json = r#"{"string_field": null}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_missing() {
        let json = r#"{}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_wrong_type() {
        let json = r#"{"string_field": 42}"#;
        let result: Result<TestStruct, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
