//! # Transport
//!
//! One request, one response. A `ChatTransport` sends a `ChatRequest` to the
//! assistant backend and returns the decoded JSON body, or a `TransportError`
//! for anything that prevents that: unreachable host, non-2xx status,
//! a body that is not JSON. No retries, no buffering, no state shared between
//! calls beyond what the caller puts in the request.

pub mod http;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

pub use http::HttpTransport;

/// Body of `POST /chat`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub situation: String,
    /// Omitted from the wire entirely when the profile runs without sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Errors that can occur during a chat exchange.
/// The controller treats every variant the same way; they differ for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Transport misconfigured (bad URL, client build failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-success status.
    Status { status: u16, body: String },
    /// Response body was not valid JSON.
    Decode(String),
    /// The request task ended without producing an outcome.
    Aborted(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Config(msg) => write!(f, "config error: {msg}"),
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Status { status, body } => {
                write!(f, "backend error (HTTP {status}): {body}")
            }
            TransportError::Decode(msg) => write!(f, "decode error: {msg}"),
            TransportError::Aborted(msg) => write!(f, "request aborted: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Returns the name of the transport.
    fn name(&self) -> &str;

    /// Perform exactly one exchange with the backend.
    async fn send(&self, request: &ChatRequest) -> Result<Value, TransportError>;
}
