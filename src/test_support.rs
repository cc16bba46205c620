//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::config::ClientProfile;
use crate::core::state::App;
use crate::transport::{ChatRequest, ChatTransport, TransportError};

/// A transport that answers every request with the same canned outcome
/// and records what it was asked.
pub struct ScriptedTransport {
    outcome: Result<Value, TransportError>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedTransport {
    pub fn new(outcome: Result<Value, TransportError>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send(&self, request: &ChatRequest) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}

/// A transport whose request task panics mid-flight.
pub struct PanickingTransport;

#[async_trait]
impl ChatTransport for PanickingTransport {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn send(&self, _request: &ChatRequest) -> Result<Value, TransportError> {
        panic!("transport blew up");
    }
}

/// Creates a test App with the default (HERA) profile.
pub fn test_app() -> App {
    test_app_with(ClientProfile::hera())
}

pub fn test_app_with(profile: ClientProfile) -> App {
    App::new(profile, "Hi, I am a test greeting.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_transport_records_requests() {
        let transport = ScriptedTransport::new(Ok(serde_json::json!({"response": "ok"})));
        let request = ChatRequest {
            situation: "hello".to_string(),
            session_id: None,
        };
        let outcome = tokio_test::block_on(transport.send(&request));
        assert_eq!(outcome.unwrap()["response"], "ok");
        assert_eq!(transport.requests.lock().unwrap().as_slice(), &[request]);
    }
}
