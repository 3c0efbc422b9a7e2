//! Scripted transport
//!
//! Replays queued outcomes in order and records every request it was asked
//! to send. Used by tests and by offline demos; never touches the network.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::{Error, Result};

enum Outcome {
    Respond(HttpResponse),
    NoResponse(String),
}

/// In-process HttpTransport with a queue of canned outcomes
///
/// When the queue is empty every request fails with `Error::Network`.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    /// Create a transport with an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a JSON content type
    pub fn respond_json(&self, status: u16, body: impl Into<String>) -> &Self {
        self.respond(HttpResponse {
            status,
            content_type: Some("application/json".to_string()),
            body: body.into(),
        })
    }

    /// Queue a response
    pub fn respond(&self, response: HttpResponse) -> &Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Outcome::Respond(response));
        self
    }

    /// Queue a failure where nothing comes back
    pub fn fail(&self, reason: impl Into<String>) -> &Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Outcome::NoResponse(reason.into()));
        self
    }

    /// Requests sent so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// Most recent request, if any
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// Number of requests sent
    pub fn request_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl HttpTransport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.sent.lock().unwrap().push(request.clone());
        match self.outcomes.lock().unwrap().pop_front() {
            Some(Outcome::Respond(response)) => Ok(response),
            Some(Outcome::NoResponse(reason)) => Err(Error::Network(reason)),
            None => Err(Error::Network("no scripted response".to_string())),
        }
    }
}
