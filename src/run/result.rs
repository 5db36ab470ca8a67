//! Run result types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::merge::{merge_data, MergeError};
use super::status::RunStatus;

/// State threaded through pipeline stages for one job run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    /// Identifier of the owning job run
    pub id: String,

    /// Accumulated output of earlier stages
    #[serde(default)]
    pub data: Value,

    #[serde(default)]
    pub status: RunStatus,

    /// Set only when `status` is `Errored`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunResult {
    /// Create an unstarted result with empty data
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Value::Object(Map::new()),
            status: RunStatus::Unstarted,
            error: None,
        }
    }

    pub fn with_data(id: impl Into<String>, data: Value) -> Self {
        Self {
            data,
            ..Self::new(id)
        }
    }

    pub fn status(mut self, status: RunStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark the result errored, keeping its id and data
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.status = RunStatus::Errored;
        self.error = Some(message.into());
        self
    }

    pub fn mark_in_progress(&mut self) {
        self.status = RunStatus::InProgress;
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Get a top-level data field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The conventional `result` output of an adapter
    pub fn result(&self) -> Option<&Value> {
        self.get("result")
    }

    /// Fold a partial result from an external adapter into this one.
    ///
    /// Data is merged with [`merge_data`]. A declared status replaces the
    /// current one and a non-empty error marks the result errored.
    pub fn merge(&self, incoming: &BridgeRunResult) -> Result<RunResult, MergeError> {
        if let Some(found) = incoming.id.as_deref().filter(|id| !id.is_empty()) {
            if found != self.id {
                return Err(MergeError::RunIdMismatch {
                    expected: self.id.clone(),
                    found: found.to_string(),
                });
            }
        }

        let mut merged = RunResult {
            data: merge_data(&self.data, &incoming.data)?,
            ..self.clone()
        };

        if let Some(status) = incoming.declared_status() {
            merged.status = status;
        }

        if let Some(error) = incoming.error.as_deref().filter(|e| !e.is_empty()) {
            merged = merged.with_error(error);
        }

        Ok(merged)
    }
}

/// Partial result returned by an external adapter
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRunResult {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub data: Value,

    #[serde(default)]
    pub status: Option<RunStatus>,

    #[serde(default)]
    pub error: Option<String>,

    /// The adapter will finish the work later and call back
    #[serde(default)]
    pub pending: bool,
}

impl BridgeRunResult {
    /// Status the adapter declared, if any.
    ///
    /// An explicit status takes precedence; otherwise `pending: true` means
    /// the run waits on the bridge.
    pub fn declared_status(&self) -> Option<RunStatus> {
        match self.status {
            Some(RunStatus::Unstarted) | None if self.pending => Some(RunStatus::PendingBridge),
            Some(RunStatus::Unstarted) | None => None,
            Some(status) => Some(status),
        }
    }
}
