//! Run status and the bridge transition table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a run result as it moves through the pipeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Not yet picked up by any stage. An empty string on the wire means the same.
    #[default]
    #[serde(alias = "")]
    Unstarted,
    InProgress,
    /// Waiting for an external adapter to call back
    PendingBridge,
    PendingConfirmations,
    PendingConnection,
    PendingSleep,
    Completed,
    Errored,
}

/// What the bridge adapter should do with a result in a given status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeAction {
    /// Result is finished; hand it back untouched
    Skip,
    /// External adapter called back; mark the run active again
    Resume,
    /// Issue a fresh request to the external adapter
    NewRun,
}

impl RunStatus {
    /// `Completed` and `Errored` are terminal
    pub fn is_finished(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Errored)
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            RunStatus::PendingBridge
                | RunStatus::PendingConfirmations
                | RunStatus::PendingConnection
                | RunStatus::PendingSleep
        )
    }

    pub fn is_pending_bridge(&self) -> bool {
        *self == RunStatus::PendingBridge
    }

    pub fn is_errored(&self) -> bool {
        *self == RunStatus::Errored
    }

    /// Decide how a bridge invocation treats a result in this status.
    ///
    /// Every variant is listed so that adding a status forces a decision here.
    pub fn bridge_action(&self) -> BridgeAction {
        match self {
            RunStatus::Completed | RunStatus::Errored => BridgeAction::Skip,
            RunStatus::PendingBridge => BridgeAction::Resume,
            RunStatus::Unstarted
            | RunStatus::InProgress
            | RunStatus::PendingConfirmations
            | RunStatus::PendingConnection
            | RunStatus::PendingSleep => BridgeAction::NewRun,
        }
    }

    /// Human label, as shown to operators
    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::Unstarted => "Unstarted",
            RunStatus::InProgress => "In Progress",
            RunStatus::PendingBridge => "Pending Bridge",
            RunStatus::PendingConfirmations => "Pending Confirmations",
            RunStatus::PendingConnection => "Pending Connection",
            RunStatus::PendingSleep => "Pending Sleep",
            RunStatus::Completed => "Completed",
            RunStatus::Errored => "Errored",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
