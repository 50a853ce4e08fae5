//! Serde helper functions for request deserialization.
//!
//! Web form and CLI payloads send empty strings for optional fields; these
//! deserializers treat them as `None` instead of failing or storing blanks.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional NaiveDate, treating empty strings as None.
/// Expects format: YYYY-MM-DD
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        date_field: Option<NaiveDate>,
    }

    #[test]
    fn test_optional_string_empty_and_whitespace() {
        let result: TestStruct = serde_json::from_str(r#"{"string_field": ""}"#).unwrap();
        assert_eq!(result.string_field, None);

        let result: TestStruct = serde_json::from_str(r#"{"string_field": "  "}"#).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_optional_string_value_and_missing() {
        let result: TestStruct = serde_json::from_str(r#"{"string_field": "hello"}"#).unwrap();
        assert_eq!(result.string_field, Some("hello".to_string()));

        let result: TestStruct = serde_json::from_str("{}").unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_optional_date_valid() {
        let result: TestStruct = serde_json::from_str(r#"{"date_field": "2025-01-15"}"#).unwrap();
        assert_eq!(
            result.date_field,
            Some(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_optional_date_empty() {
        let result: TestStruct = serde_json::from_str(r#"{"date_field": ""}"#).unwrap();
        assert_eq!(result.date_field, None);
    }

    #[test]
    fn test_optional_date_invalid_is_rejected() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"date_field": "not-a-date"}"#);
        assert!(result.is_err());
    }
}
