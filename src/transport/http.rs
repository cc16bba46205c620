//! HTTP transport against the assistant backend's `POST /chat`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;

use crate::core::config::CHAT_PATH;
use crate::transport::{ChatRequest, ChatTransport, TransportError};

pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// `base_url` is the backend origin; requests go to `<base_url>/chat`.
    /// `timeout` is applied per request when set.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Config(e.to_string()))?;

        Ok(Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), CHAT_PATH),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, request: &ChatRequest) -> Result<Value, TransportError> {
        info!(
            "POST {} (situation_len={}, session={})",
            self.endpoint,
            request.situation.len(),
            request.session_id.as_deref().unwrap_or("-")
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Backend response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Backend error: {} - {}", status.as_u16(), body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value =
            serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))?;
        debug!("Backend payload: {}", payload);
        Ok(payload)
    }
}
