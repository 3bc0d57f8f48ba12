// Payload normalization
// Object-shell pipelines emit a bare JSON object when exactly one record
// matches and a JSON array when several match. These functions erase that
// ambiguity so callers always see a uniform collection or optional.

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::constants::PAYLOAD_SNIPPET_MAX_BYTES;

/// Payload mapping errors
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("malformed payload: {reason}; payload starts with: {snippet}")]
    Malformed { reason: String, snippet: String },
}

/// Map a raw payload to zero or more records of `T`.
///
/// Blank input and a JSON `null` both mean "no records matched" and yield
/// an empty vector. An array payload preserves element order and drops
/// `null` slots. Anything that is not valid JSON for `T` is an error,
/// never an empty result.
pub fn map_to_many<T: DeserializeOwned>(payload: &str) -> Result<Vec<T>, PayloadError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let slots: Vec<Option<T>> =
            serde_json::from_str(trimmed).map_err(|e| malformed(e, trimmed))?;
        return Ok(slots.into_iter().flatten().collect());
    }

    let single: Option<T> = serde_json::from_str(trimmed).map_err(|e| malformed(e, trimmed))?;
    Ok(single.into_iter().collect())
}

/// Map a raw payload to at most one record of `T`.
///
/// Blank input and a JSON `null` yield `None`.
pub fn map_to_one<T: DeserializeOwned>(payload: &str) -> Result<Option<T>, PayloadError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map_err(|e| malformed(e, trimmed))
}

fn malformed(err: serde_json::Error, payload: &str) -> PayloadError {
    PayloadError::Malformed {
        reason: err.to_string(),
        snippet: snippet(payload, PAYLOAD_SNIPPET_MAX_BYTES),
    }
}

/// Truncate to a UTF-8-safe snippet of at most `limit` bytes.
fn snippet(s: &str, limit: usize) -> String {
    if s.len() <= limit {
        return s.to_string();
    }
    let mut end = limit;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    struct Widget {
        manufacturer: Option<String>,
        speed: Option<u32>,
    }

    #[test]
    fn many_blank_payload_is_empty() {
        assert!(map_to_many::<Widget>("").unwrap().is_empty());
        assert!(map_to_many::<Widget>("  \r\n  ").unwrap().is_empty());
    }

    #[test]
    fn many_json_null_is_empty() {
        assert!(map_to_many::<Widget>("null").unwrap().is_empty());
    }

    #[test]
    fn many_single_object_becomes_one_element() {
        let records = map_to_many::<Widget>(r#"{"Manufacturer":"x"}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].manufacturer.as_deref(), Some("x"));
        assert_eq!(records[0].speed, None);
    }

    #[test]
    fn many_array_preserves_input_order() {
        let records =
            map_to_many::<Widget>(r#"[{"Manufacturer":"x"},{"Manufacturer":"y"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].manufacturer.as_deref(), Some("x"));
        assert_eq!(records[1].manufacturer.as_deref(), Some("y"));
    }

    #[test]
    fn many_drops_null_array_slots() {
        let records =
            map_to_many::<Widget>(r#"[{"Manufacturer":"x"},null,{"Manufacturer":"y"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].manufacturer.as_deref(), Some("x"));
        assert_eq!(records[1].manufacturer.as_deref(), Some("y"));
    }

    #[test]
    fn many_empty_array_is_empty_not_error() {
        assert!(map_to_many::<Widget>("[]").unwrap().is_empty());
    }

    #[test]
    fn many_malformed_payload_is_an_error() {
        let err = map_to_many::<Widget>("not json").unwrap_err();
        let PayloadError::Malformed { reason, snippet } = err;
        assert!(!reason.is_empty());
        assert!(snippet.contains("not json"));
    }

    #[test]
    fn many_tolerates_surrounding_whitespace() {
        let records = map_to_many::<Widget>("  [{\"Manufacturer\":\"x\"}]\n").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn unknown_fields_are_ignored_and_missing_fields_are_none() {
        let records =
            map_to_many::<Widget>(r#"{"Manufacturer":"x","Voltage":12,"Status":"OK"}"#).unwrap();
        assert_eq!(records[0].manufacturer.as_deref(), Some("x"));
        assert_eq!(records[0].speed, None);
    }

    #[test]
    fn one_blank_payload_is_absent() {
        assert_eq!(map_to_one::<Widget>("").unwrap(), None);
        assert_eq!(map_to_one::<Widget>("   ").unwrap(), None);
    }

    #[test]
    fn one_json_null_is_absent() {
        assert_eq!(map_to_one::<Widget>("null").unwrap(), None);
    }

    #[test]
    fn one_single_object_is_present() {
        let record = map_to_one::<Widget>(r#"{"Manufacturer":"x","Speed":2400}"#)
            .unwrap()
            .unwrap();
        assert_eq!(record.manufacturer.as_deref(), Some("x"));
        assert_eq!(record.speed, Some(2400));
    }

    #[test]
    fn one_malformed_payload_is_an_error() {
        let err = map_to_one::<Widget>("not json").unwrap_err();
        assert!(err.to_string().contains("malformed payload"));
    }

    #[test]
    fn malformed_snippet_is_bounded() {
        let huge = format!("not json {}", "x".repeat(4096));
        let PayloadError::Malformed { snippet, .. } = map_to_many::<Widget>(&huge).unwrap_err();
        assert!(snippet.len() <= crate::application::constants::PAYLOAD_SNIPPET_MAX_BYTES);
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let s = "é".repeat(200);
        let out = snippet(&s, 3);
        assert!(out.len() <= 3);
        assert!(s.starts_with(&out));
    }
}
