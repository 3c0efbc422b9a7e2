//! Reply payload and write acknowledgments

use serde::{Deserialize, Serialize};

use super::Thread;

/// Reply composed for a thread. Sent once and not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub from: String,
    pub to: String,
    pub subject: String,
    /// HTML markup from the composer
    pub body: String,
}

impl Reply {
    /// Default reply to a thread: back to the sender, subject prefixed with `Re:`
    pub fn to_thread(thread: &Thread, from: impl Into<String>, body: impl Into<String>) -> Self {
        let subject = if thread.subject.to_ascii_lowercase().starts_with("re:") {
            thread.subject.clone()
        } else {
            format!("Re: {}", thread.subject)
        };

        Self {
            from: from.into(),
            to: thread.from.clone(),
            subject,
            body: body.into(),
        }
    }
}

/// `{success, message}` acknowledgment returned by write operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

fn default_success() -> bool {
    true
}

impl Ack {
    /// Successful acknowledgment with a message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThreadId;

    fn thread(subject: &str) -> Thread {
        Thread {
            id: ThreadId::new("1"),
            from: "john.doe@example.com".into(),
            from_name: "John Doe".into(),
            to: "me@example.com".into(),
            subject: subject.into(),
            preview: String::new(),
            body: String::new(),
            timestamp: String::new(),
            avatar: String::new(),
        }
    }

    #[test]
    fn test_reply_addresses_sender() {
        let reply = Reply::to_thread(&thread("Lunch"), "me@example.com", "<p>Sure</p>");
        assert_eq!(reply.to, "john.doe@example.com");
        assert_eq!(reply.subject, "Re: Lunch");
        assert_eq!(reply.from, "me@example.com");
    }

    #[test]
    fn test_reply_does_not_double_prefix() {
        let reply = Reply::to_thread(&thread("RE: Lunch"), "me@example.com", "");
        assert_eq!(reply.subject, "RE: Lunch");
    }

    #[test]
    fn test_ack_decodes_without_success_field() {
        let ack: Ack = serde_json::from_str(r#"{"message":"done"}"#).unwrap();
        assert!(ack.success);
        assert_eq!(ack.message, "done");
    }
}
