//! Wire payloads exchanged with external adapters

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::run::{BridgeRunResult, RunResult};

/// Path segment appended to the callback base URL, followed by the run id
pub const RUNS_PATH: &str = "/v2/runs/";

/// Body sent to an external adapter.
///
/// Only the run id, its data, and the callback URL go out, whatever else
/// [`RunResult`] carries.
#[derive(Debug, Serialize)]
pub struct OutgoingPayload<'a> {
    pub id: &'a str,
    pub data: &'a Value,
    #[serde(rename = "responseURL", skip_serializing_if = "Option::is_none")]
    pub response_url: Option<&'a str>,
}

impl<'a> OutgoingPayload<'a> {
    pub fn new(result: &'a RunResult, response_url: Option<&'a Url>) -> Self {
        Self {
            id: &result.id,
            data: &result.data,
            response_url: response_url.map(Url::as_str),
        }
    }
}

pub fn build_outgoing_payload(
    result: &RunResult,
    response_url: Option<&Url>,
) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&OutgoingPayload::new(result, response_url))
}

pub fn parse_incoming_payload(body: &[u8]) -> Result<BridgeRunResult, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Callback URL for a run, or `None` when no base is configured
pub fn response_url(base: Option<&Url>, run_id: &str) -> Option<Url> {
    base.map(|base| {
        let mut url = base.clone();
        let path = format!("{}{}{}", base.path().trim_end_matches('/'), RUNS_PATH, run_id);
        url.set_path(&path);
        url
    })
}
