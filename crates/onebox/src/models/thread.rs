//! Thread model representing one conversation in the inbox

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a thread
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(pub String);

impl ThreadId {
    /// Create a thread id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ThreadId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ThreadId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A thread as listed in the inbox and shown in the detail pane
///
/// Remote payloads are decoded leniently: unknown fields are ignored and
/// missing text fields become empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: ThreadId,
    /// Sender address
    #[serde(default)]
    pub from: String,
    /// Sender display name
    #[serde(default)]
    pub from_name: String,
    /// Recipient address
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    /// Short preview text shown in the list
    #[serde(default)]
    pub preview: String,
    /// Full body as HTML markup
    #[serde(default)]
    pub body: String,
    /// ISO-8601 timestamp, kept as received
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub avatar: String,
}

impl Thread {
    /// Parsed timestamp, or `None` if the remote sent something unparseable
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Display name if present, otherwise the sender address
    pub fn sender_display(&self) -> &str {
        if self.from_name.is_empty() {
            &self.from
        } else {
            &self.from_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_camel_case_and_defaults() {
        let json = r#"{"id":"42","fromName":"Ada","subject":"Hi","extra":true}"#;
        let thread: Thread = serde_json::from_str(json).unwrap();
        assert_eq!(thread.id, ThreadId::new("42"));
        assert_eq!(thread.from_name, "Ada");
        assert_eq!(thread.body, "");
        assert_eq!(thread.sender_display(), "Ada");
    }

    #[test]
    fn test_received_at() {
        let json = r#"{"id":"1","timestamp":"2023-03-15T10:30:00Z"}"#;
        let thread: Thread = serde_json::from_str(json).unwrap();
        let at = thread.received_at().unwrap();
        assert_eq!(at.timestamp(), 1678876200);

        let bad = Thread {
            timestamp: "yesterday".to_string(),
            ..thread
        };
        assert!(bad.received_at().is_none());
    }
}
