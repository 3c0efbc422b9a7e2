//! API client bound to the remote base URL
//!
//! Every call reads the token fresh from the credential store and sends
//! `Authorization: Bearer <token>` with a JSON content type.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::{HttpMethod, HttpRequest, HttpTransport};
use crate::error::Result;
use crate::models::ThreadId;
use crate::storage::CredentialStore;

/// Client for the Onebox REST API
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    credentials: CredentialStore,
}

impl ApiClient {
    pub const GOOGLE_LOGIN_PATH: &'static str = "auth/google-login";
    pub const LIST_PATH: &'static str = "onebox/list";

    /// Create a client bound to `base_url`
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        credentials: CredentialStore,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            credentials,
        }
    }

    /// API base without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying transport
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Credential store the token is read from
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Absolute URL for a path relative to the API base
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Path of one thread
    pub fn thread_path(id: &ThreadId) -> String {
        format!("onebox/{}", urlencoding::encode(id.as_str()))
    }

    /// Path for replying to a thread
    pub fn reply_path(id: &ThreadId) -> String {
        format!("reply/{}", urlencoding::encode(id.as_str()))
    }

    /// Default headers for an authenticated call.
    ///
    /// When signed out no Authorization header is sent and the server's
    /// rejection surfaces as a transport error.
    pub fn default_headers(&self) -> Result<Vec<(String, String)>> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(credential) = self.credentials.get()? {
            headers.push(("Authorization".to_string(), credential.bearer()));
        }
        Ok(headers)
    }

    /// Build a request for `path` with the default headers attached
    pub fn build(&self, method: HttpMethod, path: &str) -> Result<HttpRequest> {
        let mut request = HttpRequest::new(method, self.url(path));
        for (name, value) in self.default_headers()? {
            request.set_header(name, value);
        }
        Ok(request)
    }

    /// Issue a call and decode the 2xx body
    pub fn call<T: DeserializeOwned>(&self, method: HttpMethod, path: &str) -> Result<T> {
        let request = self.build(method, path)?;
        self.transport.send(&request)?.error_for_status()?.json()
    }

    /// Issue a call with a JSON body and decode the 2xx body
    pub fn call_with_body<B, T>(&self, method: HttpMethod, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.build(method, path)?;
        request.body = Some(serde_json::to_vec(body)?);
        self.transport.send(&request)?.error_for_status()?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{Credential, UserProfile};
    use crate::storage::InMemoryStore;
    use crate::transport::ScriptedTransport;

    fn client(transport: Arc<ScriptedTransport>) -> ApiClient {
        let creds = CredentialStore::new(Arc::new(InMemoryStore::new()));
        ApiClient::new("https://api.example.com/api/v1/", transport, creds)
    }

    fn sign_in(client: &ApiClient, token: &str) {
        client
            .credentials()
            .set(&Credential::new(
                token,
                UserProfile {
                    name: "Ada".into(),
                    email: "ada@example.com".into(),
                    picture: String::new(),
                },
            ))
            .unwrap();
    }

    #[test]
    fn test_url_joining() {
        let api = client(Arc::new(ScriptedTransport::new()));
        assert_eq!(api.url("onebox/list"), "https://api.example.com/api/v1/onebox/list");
        assert_eq!(api.url("/onebox/7"), "https://api.example.com/api/v1/onebox/7");
        assert_eq!(ApiClient::thread_path(&ThreadId::new("a b")), "onebox/a%20b");
    }

    #[test]
    fn test_token_is_read_on_every_call() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(200, "[]").respond_json(200, "[]");
        let api = client(transport.clone());

        sign_in(&api, "first");
        let _: serde_json::Value = api.call(HttpMethod::Get, ApiClient::LIST_PATH).unwrap();
        sign_in(&api, "second");
        let _: serde_json::Value = api.call(HttpMethod::Get, ApiClient::LIST_PATH).unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].header("Authorization"), Some("Bearer first"));
        assert_eq!(sent[1].header("Authorization"), Some("Bearer second"));
        assert_eq!(sent[1].header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_signed_out_sends_no_auth_header() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(401, r#"{"error":"unauthorized"}"#);
        let api = client(transport.clone());

        let err = api
            .call::<serde_json::Value>(HttpMethod::Get, ApiClient::LIST_PATH)
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(transport.last_request().unwrap().header("Authorization").is_none());
    }

    #[test]
    fn test_body_is_json_encoded() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(200, r#"{"success":true,"message":"ok"}"#);
        let api = client(transport.clone());

        let body = serde_json::json!({"to": "a@example.com"});
        let _: serde_json::Value = api.call_with_body(HttpMethod::Post, "reply/1", &body).unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        let decoded: serde_json::Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn test_network_failure_propagates() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail("connection refused");
        let api = client(transport);

        let err = api
            .call::<serde_json::Value>(HttpMethod::Delete, "onebox/1")
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }
}
