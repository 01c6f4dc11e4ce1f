//! Validation of raw profile text into the profile model.

use super::schema::{type_name, ProfileResponse};
use crate::utils::config::REQUIRED_FIELD;
use crate::utils::error::ParseError;
use log::debug;
use serde_json::Value;

/// Parse raw text into a profile response
///
/// **Public** - main entry point for loading a profile
///
/// Only the presence of `profile.shards` is checked; deeper structural
/// defects degrade to zero/empty values during deserialization.
///
/// # Errors
/// * `ParseError::Json` - Text is not valid JSON
/// * `ParseError::MissingField` - `profile.shards` is absent or null
/// * `ParseError::InvalidFormat` - `profile.shards` is not an array of objects
pub fn parse_profile(text: &str) -> Result<ProfileResponse, ParseError> {
    let raw: Value = serde_json::from_str(text)?;

    let shards = raw
        .get("profile")
        .and_then(|profile| profile.get("shards"))
        .filter(|shards| !shards.is_null())
        .ok_or_else(|| ParseError::MissingField(REQUIRED_FIELD.to_string()))?;

    let entries = shards.as_array().ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "'{}' must be an array, found {}",
            REQUIRED_FIELD,
            type_name(shards)
        ))
    })?;

    if let Some((index, entry)) = entries.iter().enumerate().find(|(_, e)| !e.is_object()) {
        return Err(ParseError::InvalidFormat(format!(
            "'{}' must contain objects, found {} at index {}",
            REQUIRED_FIELD,
            type_name(entry),
            index
        )));
    }

    let response: ProfileResponse =
        serde_json::from_value(raw).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

    debug!("Parsed profile with {} shards", response.shards().len());

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_json() {
        let err = parse_profile("{not json").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_rejects_missing_shards() {
        let err = parse_profile(r#"{"took":1}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(_)));
        assert!(err.to_string().contains("profile.shards"));
    }

    #[test]
    fn test_rejects_null_shards() {
        let err = parse_profile(r#"{"profile":{"shards":null}}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(_)));
    }

    #[test]
    fn test_rejects_non_array_shards() {
        let err = parse_profile(r#"{"profile":{"shards":5}}"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_rejects_scalar_shard_entries() {
        let err = parse_profile(r#"{"profile":{"shards":[5]}}"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));

        let err = parse_profile(r#"{"profile":{"shards":[{"id":"0"}, "x"]}}"#).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_accepts_empty_shards() {
        let response = parse_profile(r#"{"took":3,"profile":{"shards":[]}}"#).unwrap();
        assert!(response.shards().is_empty());
    }
}
