//! HTTP transport to external adapters
//!
//! The bridge only needs "send a signed JSON POST, get status and body back".
//! [`HttpTransport`] does that with reqwest. It never retries, and a timeout
//! applies only when one is configured.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::TransportConfig;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("building outgoing bridge http post: {0}")]
    Build(String),

    #[error("POST request: {0}")]
    Request(String),

    #[error("POST response: {status} {body}")]
    Status { status: u16, body: String },

    #[error("reading response body: {0}")]
    Body(String),
}

/// A JSON POST to an external adapter
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub url: Url,
    pub bearer_token: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request. Statuses of 400 and above come back as
    /// [`TransportError::Status`].
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::with_client(reqwest::Client::new())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError> {
        let start = std::time::Instant::now();
        debug!("Executing POST {}", request.url);

        let response = self
            .client
            .post(request.url.clone())
            .header("Authorization", format!("Bearer {}", request.bearer_token))
            .header("Content-Type", "application/json")
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                warn!("Request to {} failed: {}", request.url, e);
                TransportError::Request(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        info!(
            "POST {} -> {} ({}ms)",
            request.url,
            status,
            start.elapsed().as_millis()
        );

        if status >= 400 {
            return Err(TransportError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
