//! Serde helper functions for request deserialization.
//!
//! Clients send empty strings for unset optional fields and references to
//! other entities either as numbers or as strings (`"3"`, `"/api/v1/editors/3"`).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::catalog::{sanitize_reference, UNRESOLVED_REFERENCE};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional NaiveDate, treating empty strings as None.
/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps (date part is kept).
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_date(s.trim())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}"))),
        _ => Ok(None),
    }
}

/// Parses a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Id(i64),
    Text(String),
}

impl RawReference {
    /// Blank text counts as absent. Any other text without digits maps to
    /// [`UNRESOLVED_REFERENCE`] so the lookup downstream reports it missing.
    fn resolve(self) -> Option<i64> {
        match self {
            RawReference::Id(id) => Some(id),
            RawReference::Text(text) if text.trim().is_empty() => None,
            RawReference::Text(text) => {
                Some(sanitize_reference(&text).unwrap_or(UNRESOLVED_REFERENCE))
            }
        }
    }
}

/// Deserialize an optional entity reference given as a number or a string.
pub fn deserialize_optional_reference<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawReference> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(RawReference::resolve))
}

/// Deserialize a list of entity references, skipping blank entries.
pub fn deserialize_reference_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<RawReference>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(RawReference::resolve)
        .collect())
}

/// Like [`deserialize_reference_list`] but keeps "absent" distinct from "empty".
pub fn deserialize_optional_reference_list<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<RawReference>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|refs| refs.into_iter().filter_map(RawReference::resolve).collect()))
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
        #[serde(default, deserialize_with = "deserialize_optional_reference")]
        reference: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_reference_list")]
        references: Vec<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_reference_list")]
        maybe_references: Option<Vec<i64>>,
    }

    #[test]
    fn test_deserialize_optional_string_empty() {
        let json = r#"{"string_field": "  "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "cover.jpg"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("cover.jpg".to_string()));
    }

    #[test]
    fn test_deserialize_optional_date_formats() {
        let plain: TestStruct = serde_json::from_str(r#"{"date_field": "2017-03-03"}"#).unwrap();
        assert_eq!(plain.date_field, NaiveDate::from_ymd_opt(2017, 3, 3));

        let rfc: TestStruct =
            serde_json::from_str(r#"{"date_field": "2017-03-03T00:00:00+00:00"}"#).unwrap();
        assert_eq!(rfc.date_field, NaiveDate::from_ymd_opt(2017, 3, 3));

        let empty: TestStruct = serde_json::from_str(r#"{"date_field": ""}"#).unwrap();
        assert_eq!(empty.date_field, None);
    }

    #[test]
    fn test_deserialize_optional_date_invalid() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"date_field": "03/03/2017"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_reference_forms() {
        let json = r#"{"reference": "/api/v1/editors/4", "references": [1, "2", " "]}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.reference, Some(4));
        assert_eq!(result.references, vec![1, 2]);
        assert_eq!(result.maybe_references, None);
    }

    #[test]
    fn test_deserialize_reference_without_digits_is_kept() {
        let json = r#"{"reference": "abc", "references": [1, "x"], "maybe_references": ["y"]}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.reference, Some(UNRESOLVED_REFERENCE));
        assert_eq!(result.references, vec![1, UNRESOLVED_REFERENCE]);
        assert_eq!(result.maybe_references, Some(vec![UNRESOLVED_REFERENCE]));

        let blank: TestStruct = serde_json::from_str(r#"{"reference": ""}"#).unwrap();
        assert_eq!(blank.reference, None);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let result: TestStruct = serde_json::from_str("{}").unwrap();
        assert_eq!(result.reference, None);
        assert!(result.references.is_empty());
    }

    #[test]
    fn test_deserialize_empty_reference_list_is_some() {
        let result: TestStruct = serde_json::from_str(r#"{"maybe_references": []}"#).unwrap();
        assert_eq!(result.maybe_references, Some(vec![]));
    }
}
