//! External adapter bridge
//!
//! Sends the current run result to an external adapter and folds the
//! adapter's answer back in. Adapters that finish later answer with
//! `pending: true` and call back on the response URL; the pipeline then
//! re-presents the result with status `PendingBridge`, which this bridge
//! resumes without another request.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::payload::{build_outgoing_payload, parse_incoming_payload, response_url};
use super::transport::{HttpTransport, OutgoingRequest, Transport};
use super::{Adapter, BridgeError};
use crate::config::{BridgeType, ConfigError, RuntimeConfig};
use crate::run::{merge_data, BridgeAction, RunResult};

#[derive(Debug, Clone)]
pub struct ExternalBridge<T = HttpTransport> {
    bridge_type: BridgeType,
    params: Option<Value>,
    transport: T,
}

impl ExternalBridge<HttpTransport> {
    pub fn new(bridge_type: BridgeType) -> Self {
        Self::with_transport(bridge_type, HttpTransport::default())
    }

    /// Build a bridge for a registered adapter, using the configured transport settings
    pub fn from_config(name: &str, config: &RuntimeConfig) -> Result<Self, ConfigError> {
        let bridge_type = config.bridge(name)?.clone();
        let transport = HttpTransport::new(&config.transport)
            .map_err(|e| ConfigError::Transport(e.to_string()))?;
        Ok(Self::with_transport(bridge_type, transport))
    }
}

impl<T: Transport> ExternalBridge<T> {
    pub fn with_transport(bridge_type: BridgeType, transport: T) -> Self {
        Self {
            bridge_type,
            params: None,
            transport,
        }
    }

    /// Static parameters merged into the run data before each request
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn bridge_type(&self) -> &BridgeType {
        &self.bridge_type
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn handle_new_run(&self, mut input: RunResult, base_url: Option<&Url>) -> RunResult {
        if let Some(params) = &self.params {
            match merge_data(&input.data, params) {
                Ok(data) => input.data = data,
                Err(e) => return BridgeError::DataParam(e).into_result(input),
            }
        }

        let response_url = response_url(base_url, &input.id);
        let outcome = match self.post_to_external_adapter(&input, response_url.as_ref()).await {
            Ok(body) => response_to_run_result(&body, &input),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                info!(
                    run_id = %result.id,
                    bridge = %self.bridge_type.name,
                    status = %result.status,
                    "External adapter responded"
                );
                result
            }
            Err(e) => {
                warn!(run_id = %input.id, bridge = %self.bridge_type.name, "{}", e);
                e.into_result(input)
            }
        }
    }

    async fn post_to_external_adapter(
        &self,
        input: &RunResult,
        response_url: Option<&Url>,
    ) -> Result<Vec<u8>, BridgeError> {
        let body = build_outgoing_payload(input, response_url).map_err(BridgeError::Serialization)?;

        let response = self
            .transport
            .send(OutgoingRequest {
                url: self.bridge_type.url.clone(),
                bearer_token: self.bridge_type.outgoing_token.clone(),
                body,
            })
            .await?;

        Ok(response.body)
    }
}

fn response_to_run_result(body: &[u8], input: &RunResult) -> Result<RunResult, BridgeError> {
    let incoming = parse_incoming_payload(body).map_err(BridgeError::Unmarshal)?;
    input.merge(&incoming).map_err(BridgeError::MergePayload)
}

fn resume_bridge(mut input: RunResult) -> RunResult {
    input.mark_in_progress();
    input
}

#[async_trait]
impl<T: Transport> Adapter for ExternalBridge<T> {
    async fn perform(&self, input: RunResult, config: &RuntimeConfig) -> RunResult {
        match input.status.bridge_action() {
            BridgeAction::Skip => {
                debug!(run_id = %input.id, status = %input.status, "Run already finished");
                input
            }
            BridgeAction::Resume => {
                debug!(run_id = %input.id, "Resuming run after bridge callback");
                resume_bridge(input)
            }
            BridgeAction::NewRun => {
                self.handle_new_run(input, config.bridge_response_url.as_ref())
                    .await
            }
        }
    }
}
