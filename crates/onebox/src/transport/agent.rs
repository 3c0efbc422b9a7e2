//! ureq-backed transport
//!
//! Uses synchronous HTTP (ureq) to be executor-agnostic. Non-2xx statuses are
//! returned as responses so callers can read the error body.

use ureq::Agent;
use ureq::http::Request;
use log::{debug, warn};

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::{Error, Result};

/// Transport that performs real network I/O
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport with a fresh ureq agent
    pub fn new() -> Self {
        let config = Agent::config_builder().http_status_as_error(false).build();
        Self {
            agent: Agent::new_with_config(config),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!("{} {}", request.method, request.url);

        let mut builder = Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let sent = match &request.body {
            Some(body) => builder
                .body(body.clone())
                .map_err(|e| Error::Request(e.to_string()))
                .and_then(|req| self.agent.run(req).map_err(map_error)),
            None => builder
                .body(())
                .map_err(|e| Error::Request(e.to_string()))
                .and_then(|req| self.agent.run(req).map_err(map_error)),
        };
        let mut response = sent?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        // A response arrived, so a failed body read keeps its status
        let body = match response.body_mut().read_to_vec() {
            Ok(bytes) => decode_text(bytes),
            Err(e) => {
                warn!("{} {} -> {}, body unreadable: {}", request.method, request.url, status, e);
                return Err(Error::Transport {
                    status,
                    body: format!("<unreadable body: {}>", e),
                });
            }
        };

        debug!("{} {} -> {}", request.method, request.url, status);
        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Setup problems stay request errors; everything else means no response
fn map_error(err: ureq::Error) -> Error {
    match err {
        ureq::Error::BadUri(msg) => Error::Request(msg),
        ureq::Error::Http(e) => Error::Request(e.to_string()),
        other => Error::Network(other.to_string()),
    }
}

/// Body text, replacing invalid UTF-8 rather than rejecting the response
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpMethod;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned raw HTTP response on a local port
    fn serve_once(raw: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(raw).unwrap();
        });
        format!("http://{}/onebox/list", addr)
    }

    #[test]
    fn test_map_error_classification() {
        assert!(matches!(
            map_error(ureq::Error::BadUri("nope".to_string())),
            Error::Request(_)
        ));
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(map_error(ureq::Error::Io(refused)), Error::Network(_)));
    }

    #[test]
    fn test_decode_text_is_lossy() {
        assert_eq!(decode_text(b"ok".to_vec()), "ok");
        assert_eq!(decode_text(vec![0xff, 0xfe, b'x']), "\u{fffd}\u{fffd}x");
    }

    #[test]
    fn test_non_utf8_error_body_keeps_status() {
        let url = serve_once(
            b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 3\r\nConnection: close\r\n\r\n\xff\xfex",
        );

        let response = UreqTransport::new()
            .send(&HttpRequest::new(HttpMethod::Get, url))
            .unwrap();
        assert_eq!(response.status, 500);
        assert!(response.body.ends_with('x'));
        assert!(matches!(
            response.error_for_status(),
            Err(Error::Transport { status: 500, .. })
        ));
    }

    #[test]
    fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let err = UreqTransport::new()
            .send(&HttpRequest::new(HttpMethod::Get, url))
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }
}
