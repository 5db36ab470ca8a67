//! # Bridge Adapter
//!
//! A pipeline stage that hands intermediate run results to external adapters
//! (third-party HTTP services) and folds their answers back into the run.
//!
//! ## Features
//!
//! - **Result state machine** - Finished results are left alone, results
//!   waiting on a callback are resumed, everything else is sent out
//! - **Deep JSON merge** - Adapter output and static parameters are merged
//!   into the run data with incoming-wins semantics
//! - **Asynchronous adapters** - Adapters may answer `pending` and call back
//!   on a per-run response URL
//! - **Errors as data** - Every failure ends up as an `Errored` result with a
//!   message naming the phase that failed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bridge_adapter::{Adapter, BridgeType, ExternalBridge, RunResult, RuntimeConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let bridge_type = BridgeType::new(
//!         "randomnumber",
//!         "http://localhost:8080/random".parse()?,
//!         "outgoing-secret",
//!     )?;
//!     let bridge = ExternalBridge::new(bridge_type).with_params(json!({"multiply": 100}));
//!
//!     let input = RunResult::with_data("run-1", json!({"value": 5}));
//!     let result = bridge.perform(input, &RuntimeConfig::default()).await;
//!
//!     println!("status={} data={}", result.status, result.data);
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod config;
pub mod run;

// Re-export main types
pub use bridge::{
    Adapter, BridgeError, ExternalBridge, HttpTransport, OutgoingPayload, OutgoingRequest,
    Transport, TransportError, TransportResponse,
};
pub use config::{BridgeType, ConfigError, RuntimeConfig, TransportConfig};
pub use run::{merge_data, BridgeAction, BridgeRunResult, MergeError, RunResult, RunStatus};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bridge::{Adapter, ExternalBridge, Transport};
    pub use crate::config::{BridgeType, RuntimeConfig};
    pub use crate::run::{BridgeRunResult, RunResult, RunStatus};
}
