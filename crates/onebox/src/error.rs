//! Error types surfaced by Onebox operations

use thiserror::Error;

use crate::models::ThreadId;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the transport, data sources and operations
#[derive(Error, Debug)]
pub enum Error {
    /// The remote answered with a non-2xx status
    #[error("Server responded with status {status}: {body}")]
    Transport { status: u16, body: String },

    /// No response was received at all (connection, DNS, TLS, relay failure)
    #[error("No response received from server. CORS issue or server unavailable. ({0})")]
    Network(String),

    /// The request could not be built (bad URL, bad header name, ...)
    #[error("Invalid request: {0}")]
    Request(String),

    /// Caller-supplied input was rejected before sending
    #[error("{0}")]
    Validation(String),

    /// Requested thread is absent from the catalog
    #[error("Thread not found: {0}")]
    NotFound(ThreadId),

    /// No usable credential
    #[error("{0}")]
    Authentication(String),

    /// A 2xx body could not be decoded into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local persisted state could not be read or written
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Whether this error came from talking to the remote API.
    ///
    /// These are the failures that domain operations may replace with mock
    /// data or an optimistic acknowledgment.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Network(_) | Self::Decode(_)
        )
    }

    /// HTTP status carried by the error, if the remote responded
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_embeds_status_and_body() {
        let err = Error::Transport {
            status: 404,
            body: r#"{"error":"missing"}"#.to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("missing"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_transport_failure_classification() {
        assert!(Error::Network("refused".into()).is_transport_failure());
        assert!(!Error::NotFound(ThreadId::new("9")).is_transport_failure());
        assert!(!Error::validation("bad").is_transport_failure());
        assert!(!Error::authentication("none").is_transport_failure());
    }
}
