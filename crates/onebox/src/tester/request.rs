//! Form input handling for the API tester

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::transport::HttpMethod;

/// One editable custom-header row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRow {
    pub key: String,
    pub value: String,
}

impl HeaderRow {
    /// Create a header row
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse `Key: value` (or `Key=value`) as typed on a command line
    pub fn parse(raw: &str) -> Result<Self> {
        let (key, value) = raw
            .split_once(':')
            .or_else(|| raw.split_once('='))
            .ok_or_else(|| Error::validation(format!("Header must look like 'Key: value': {}", raw)))?;
        Ok(Self::new(key.trim(), value.trim()))
    }
}

/// Turn header rows into the header list to send.
///
/// Keys and values are trimmed. Rows with an empty key or value are dropped.
/// A later row replaces an earlier one with the same key.
pub fn collect_headers(rows: &[HeaderRow]) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::new();
    for row in rows {
        let key = row.key.trim();
        let value = row.value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        match headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
        {
            Some(slot) => slot.1 = value.to_string(),
            None => headers.push((key.to_string(), value.to_string())),
        }
    }
    headers
}

/// Parse the free-form body text for a request.
///
/// Only POST, PUT and PATCH carry a body; blank text means no body.
pub fn parse_body(method: HttpMethod, text: &str) -> Result<Option<Value>> {
    if !method.carries_body() || text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|_| Error::validation("Invalid JSON in request data"))
}

/// Pretty-print valid JSON; anything else is returned unchanged
pub fn format_json(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_key_rows_are_dropped() {
        let rows = vec![HeaderRow::new("X-Test", "1"), HeaderRow::new("", "2")];
        let headers = collect_headers(&rows);
        assert_eq!(headers, vec![("X-Test".to_string(), "1".to_string())]);
        assert!(!headers.iter().any(|(_, v)| v == "2"));
    }

    #[test]
    fn test_rows_are_trimmed_and_blank_values_dropped() {
        let rows = vec![
            HeaderRow::new("  X-Trace ", " abc "),
            HeaderRow::new("X-Empty", "   "),
            HeaderRow::new("x-trace", "def"),
        ];
        assert_eq!(
            collect_headers(&rows),
            vec![("X-Trace".to_string(), "def".to_string())]
        );
    }

    #[test]
    fn test_header_row_parse() {
        assert_eq!(HeaderRow::parse("X-Test: 1").unwrap(), HeaderRow::new("X-Test", "1"));
        assert_eq!(HeaderRow::parse("X-Test=1").unwrap(), HeaderRow::new("X-Test", "1"));
        assert!(HeaderRow::parse("novalue").is_err());
    }

    #[test]
    fn test_parse_body_only_for_body_methods() {
        assert_eq!(parse_body(HttpMethod::Get, r#"{"a":1}"#).unwrap(), None);
        assert_eq!(parse_body(HttpMethod::Delete, "not json").unwrap(), None);
        assert_eq!(parse_body(HttpMethod::Post, "  ").unwrap(), None);
        assert_eq!(
            parse_body(HttpMethod::Patch, r#"{"a":1}"#).unwrap(),
            Some(json!({"a": 1}))
        );
    }

    #[test]
    fn test_parse_body_rejects_malformed_json() {
        match parse_body(HttpMethod::Put, "{oops") {
            Err(Error::Validation(msg)) => assert_eq!(msg, "Invalid JSON in request data"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_format_json() {
        assert_eq!(format_json(r#"{"a":1}"#), "{\n  \"a\": 1\n}");
        assert_eq!(format_json("{oops"), "{oops");
    }
}
