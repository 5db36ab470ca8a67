//! Bridge to external adapters
//!
//! This module contains:
//! - `external` - The bridge adapter deciding whether to skip, resume, or call out
//! - `payload` - Outgoing and incoming wire payloads
//! - `transport` - The HTTP transport used to reach adapters

use async_trait::async_trait;

use crate::config::RuntimeConfig;
use crate::run::{MergeError, RunResult};

pub mod external;
pub mod payload;
pub mod transport;

pub use external::ExternalBridge;
pub use payload::{
    build_outgoing_payload, parse_incoming_payload, response_url, OutgoingPayload, RUNS_PATH,
};
pub use transport::{HttpTransport, OutgoingRequest, Transport, TransportError, TransportResponse};

/// Failures of a bridge invocation, each naming the phase that failed
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("handling data param: {0}")]
    DataParam(#[source] MergeError),

    #[error("post to external adapter: marshaling request body: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("post to external adapter: {0}")]
    Post(#[from] TransportError),

    #[error("unmarshaling JSON: {0}")]
    Unmarshal(#[source] serde_json::Error),

    #[error("Unable to merge received payload: {0}")]
    MergePayload(#[source] MergeError),
}

impl BridgeError {
    /// Record this failure on a result. The message is what operators see.
    pub fn into_result(self, input: RunResult) -> RunResult {
        input.with_error(format!("ExternalBridge {}", self))
    }
}

/// A pipeline stage that turns one run result into the next
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Perform the stage. Failures are reported on the returned result,
    /// never raised.
    async fn perform(&self, input: RunResult, config: &RuntimeConfig) -> RunResult;
}
