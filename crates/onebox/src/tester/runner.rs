//! Direct request runner
//!
//! Sends exactly the request the tester describes. There is no
//! development-mode short-circuit and no mock fallback: failures are
//! rewritten into descriptive errors and always returned.

use log::{error, info};
use serde_json::Value;
use std::time::{Duration, Instant};

use super::RelayProxy;
use crate::error::{Error, Result};
use crate::transport::{ApiClient, HttpMethod, HttpRequest, HttpResponse};

/// Everything the tester form supplies for one call
#[derive(Debug, Clone, PartialEq)]
pub struct DirectRequest {
    /// Absolute target URL
    pub endpoint: String,
    pub use_relay: bool,
    pub method: HttpMethod,
    /// Attached only for POST, PUT and PATCH
    pub body: Option<Value>,
    /// Extra headers; these override the defaults by name
    pub headers: Vec<(String, String)>,
}

impl DirectRequest {
    /// GET request to `endpoint`
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            use_relay: false,
            method: HttpMethod::Get,
            body: None,
            headers: Vec::new(),
        }
    }

    /// Set the method
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Route through the relay
    pub fn relay(mut self, use_relay: bool) -> Self {
        self.use_relay = use_relay;
        self
    }

    /// Set the JSON body
    pub fn body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Set the extra headers
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }
}

/// Timing and size details for the response panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub elapsed: Duration,
    /// Length of the decoded body re-serialized as JSON
    pub size: usize,
    pub content_type: String,
}

/// Runner behind the API tester
pub struct DirectRequestRunner {
    api: ApiClient,
    relay: RelayProxy,
}

impl DirectRequestRunner {
    /// Create a runner sharing the operations' API client
    pub fn new(api: ApiClient, relay: RelayProxy) -> Self {
        Self { api, relay }
    }

    /// Relay used when a request asks for one
    pub fn relay(&self) -> RelayProxy {
        self.relay
    }

    /// Absolute URL of the thread list endpoint
    pub fn list_endpoint(&self) -> String {
        self.api.url(ApiClient::LIST_PATH)
    }

    /// URL actually requested, after optional relay rewriting
    pub fn target_url(&self, request: &DirectRequest) -> String {
        if request.use_relay {
            self.relay.wrap(&request.endpoint)
        } else {
            request.endpoint.clone()
        }
    }

    /// Assemble the outbound request without sending it
    pub fn build(&self, request: &DirectRequest) -> Result<HttpRequest> {
        let mut http = HttpRequest::new(request.method, self.target_url(request));
        for (name, value) in self.api.default_headers()? {
            http.set_header(name, value);
        }
        http.set_header("X-Requested-With", "XMLHttpRequest");
        for (name, value) in &request.headers {
            http.set_header(name.clone(), value.clone());
        }

        if request.method.carries_body()
            && let Some(body) = &request.body
        {
            http.body = Some(serde_json::to_vec(body)?);
        }
        Ok(http)
    }

    /// Send the request and return the decoded body unchanged
    pub fn send(&self, request: &DirectRequest) -> Result<Value> {
        self.send_timed(request).map(|(body, _)| body)
    }

    /// Send the request and also report elapsed time, size and content type
    pub fn send_timed(&self, request: &DirectRequest) -> Result<(Value, ResponseMetadata)> {
        let http = self.build(request)?;
        info!("Sending direct API request: {} {}", http.method, http.url);

        let started = Instant::now();
        let response = match self.api.transport().send(&http) {
            Ok(response) => response,
            Err(e) => {
                error!("Direct API request failed: {}", e);
                return Err(e);
            }
        };
        let elapsed = started.elapsed();

        if !response.is_success() {
            let body = describe_body(&response);
            error!("Direct API request failed with status {}: {}", response.status, body);
            return Err(Error::Transport {
                status: response.status,
                body,
            });
        }

        let body = decode_body(&response);
        let metadata = ResponseMetadata {
            elapsed,
            size: body.to_string().len(),
            content_type: response.content_type.clone().unwrap_or_else(|| {
                if body.is_object() || body.is_array() {
                    "JSON".to_string()
                } else {
                    "text".to_string()
                }
            }),
        };
        Ok((body, metadata))
    }

    /// Fetch the thread list straight from the API, bypassing the operations.
    /// `body` is sent only for POST, PUT and PATCH.
    pub fn fetch_list_direct(
        &self,
        use_relay: bool,
        method: HttpMethod,
        body: Option<Value>,
        headers: Vec<(String, String)>,
    ) -> Result<Value> {
        let request = DirectRequest::get(self.list_endpoint())
            .method(method)
            .relay(use_relay)
            .body(body)
            .headers(headers);
        self.send(&request)
    }
}

/// JSON bodies decode to JSON; anything else is kept as a string
fn decode_body(response: &HttpResponse) -> Value {
    response
        .json()
        .unwrap_or_else(|_| Value::String(response.body.clone()))
}

/// Compact JSON rendering of an error body
fn describe_body(response: &HttpResponse) -> String {
    decode_body(response).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Credential, UserProfile};
    use crate::storage::{CredentialStore, InMemoryStore};
    use crate::transport::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn runner(transport: Arc<ScriptedTransport>) -> DirectRequestRunner {
        let creds = CredentialStore::new(Arc::new(InMemoryStore::new()));
        creds
            .set(&Credential::new(
                "tok",
                UserProfile {
                    name: "Ada".into(),
                    email: "ada@example.com".into(),
                    picture: String::new(),
                },
            ))
            .unwrap();
        let api = ApiClient::new("https://api.example.com/api/v1", transport, creds);
        DirectRequestRunner::new(api, RelayProxy::CorsProxyIo)
    }

    #[test]
    fn test_relay_rewrites_target() {
        let runner = runner(Arc::new(ScriptedTransport::new()));
        let request = DirectRequest::get("https://example.com/foo").relay(true);
        assert_eq!(
            runner.target_url(&request),
            format!("{}{}", RelayProxy::CorsProxyIo.prefix(), "https%3A%2F%2Fexample.com%2Ffoo")
        );
        assert_eq!(
            runner.target_url(&request.relay(false)),
            "https://example.com/foo"
        );
    }

    #[test]
    fn test_default_and_custom_headers() {
        let runner = runner(Arc::new(ScriptedTransport::new()));
        let request = DirectRequest::get("https://example.com/foo").headers(vec![
            ("X-Test".to_string(), "1".to_string()),
            ("authorization".to_string(), "Bearer override".to_string()),
        ]);
        let http = runner.build(&request).unwrap();

        assert_eq!(http.header("X-Requested-With"), Some("XMLHttpRequest"));
        assert_eq!(http.header("X-Test"), Some("1"));
        assert_eq!(http.header("Authorization"), Some("Bearer override"));
        assert_eq!(http.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_body_only_for_body_methods() {
        let runner = runner(Arc::new(ScriptedTransport::new()));
        let body = Some(json!({"a": 1}));

        let get = DirectRequest::get("https://example.com").body(body.clone());
        assert!(runner.build(&get).unwrap().body.is_none());

        let delete = get.clone().method(HttpMethod::Delete);
        assert!(runner.build(&delete).unwrap().body.is_none());

        let put = get.method(HttpMethod::Put);
        assert_eq!(runner.build(&put).unwrap().body, Some(br#"{"a":1}"#.to_vec()));
    }

    #[test]
    fn test_non_2xx_error_embeds_status_and_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(404, r#"{"error":"missing"}"#);
        let runner = runner(transport);

        let err = runner
            .send(&DirectRequest::get("https://example.com/foo"))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("404"), "{}", msg);
        assert!(msg.contains("missing"), "{}", msg);
    }

    #[test]
    fn test_no_response_is_network_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail("dns failure");
        let runner = runner(transport);

        let err = runner
            .send(&DirectRequest::get("https://example.com/foo"))
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
        assert!(err.to_string().contains("No response received"));
    }

    #[test]
    fn test_success_returns_body_and_metadata() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(200, r#"[{"id":"1"}]"#);
        let runner = runner(transport);

        let (body, meta) = runner
            .send_timed(&DirectRequest::get("https://example.com/foo"))
            .unwrap();
        assert_eq!(body, json!([{"id": "1"}]));
        assert_eq!(meta.size, r#"[{"id":"1"}]"#.len());
        assert_eq!(meta.content_type, "application/json");
    }

    #[test]
    fn test_non_json_body_is_returned_as_text() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(HttpResponse {
            status: 200,
            content_type: None,
            body: "pong".to_string(),
        });
        let runner = runner(transport);

        let (body, meta) = runner
            .send_timed(&DirectRequest::get("https://example.com/ping"))
            .unwrap();
        assert_eq!(body, Value::String("pong".to_string()));
        assert_eq!(meta.content_type, "text");
    }

    #[test]
    fn test_fetch_list_direct_targets_list_endpoint() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(200, "[]");
        let runner = runner(transport.clone());

        runner
            .fetch_list_direct(true, HttpMethod::Get, None, Vec::new())
            .unwrap();
        let sent = transport.last_request().unwrap();
        assert_eq!(
            sent.url,
            RelayProxy::CorsProxyIo.wrap("https://api.example.com/api/v1/onebox/list")
        );
    }

    #[test]
    fn test_fetch_list_direct_posts_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(200, "[]").respond_json(200, "[]");
        let runner = runner(transport.clone());

        runner
            .fetch_list_direct(false, HttpMethod::Post, Some(json!({"page": 2})), Vec::new())
            .unwrap();
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "https://api.example.com/api/v1/onebox/list");
        assert_eq!(sent.body, Some(br#"{"page":2}"#.to_vec()));

        runner
            .fetch_list_direct(false, HttpMethod::Get, Some(json!({"page": 2})), Vec::new())
            .unwrap();
        assert!(transport.last_request().unwrap().body.is_none());
    }
}
