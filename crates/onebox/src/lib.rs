//! Onebox crate - request orchestration for the Onebox mail client
//!
//! This crate provides the platform-independent layer the front-end talks to:
//! - Domain models (Thread, Credential, Reply, Ack)
//! - A transport client bound to the remote API base with bearer auth
//! - Live and mock data sources selected once at startup
//! - Domain operations with an explicit fallback policy
//! - Google OAuth redirect and callback handling
//! - Local persisted state (credential, drafts, theme)
//! - Keyword-based tag suggestion
//! - A direct request runner for the API tester
//!
//! This crate has zero UI dependencies.

pub mod auth;
pub mod config;
pub mod error;
pub mod inbox;
pub mod models;
pub mod operations;
pub mod source;
pub mod storage;
pub mod tagging;
pub mod tester;
pub mod transport;

pub use auth::{CALLBACK_RETRY_DELAY, Session, google_login_url, redirect_to_google_login};
pub use self::config::{Environment, FallbackPolicy, OneboxConfig};
pub use error::{Error, Result};
pub use inbox::Inbox;
pub use models::{Ack, Credential, Reply, Thread, ThreadId, UserProfile};
pub use operations::Onebox;
pub use source::{DataSource, LiveSource, MockDataProvider, MockSource};
pub use storage::{
    CredentialStore, DraftStore, FileStore, InMemoryStore, KeyValueStore, Theme, ThemeStore,
};
pub use tagging::{Tag, TagKind, suggest_tags};
pub use tester::{
    DirectRequest, DirectRequestRunner, HeaderRow, RelayProxy, ResponseMetadata, collect_headers,
    format_json, parse_body,
};
pub use transport::{ApiClient, HttpMethod, HttpRequest, HttpResponse, HttpTransport, UreqTransport};
