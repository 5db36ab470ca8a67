//! Run result model
//!
//! This module contains:
//! - `status` - Run statuses and the bridge transition table
//! - `result` - The run result threaded through the pipeline and the partial
//!   result returned by external adapters
//! - `merge` - JSON merge rules used to combine results

pub mod merge;
pub mod result;
pub mod status;

pub use merge::{merge_data, MergeError};
pub use result::{BridgeRunResult, RunResult};
pub use status::{BridgeAction, RunStatus};
