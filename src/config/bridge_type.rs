//! External adapter definitions

use serde::{Deserialize, Serialize};
use url::Url;

use super::ConfigError;

/// An external adapter the pipeline can bridge to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeType {
    /// Name tasks use to refer to this adapter. Filled from the map key when
    /// loaded from a runtime config file.
    #[serde(default)]
    pub name: String,

    /// Endpoint that receives the outgoing payload
    pub url: Url,

    /// Bearer token attached to requests sent to the adapter
    pub outgoing_token: String,

    /// Token the adapter presents when calling back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoming_token: Option<String>,
}

impl BridgeType {
    pub fn new(name: &str, url: Url, outgoing_token: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            name: normalize_name(name)?,
            url,
            outgoing_token: outgoing_token.into(),
            incoming_token: None,
        })
    }

    pub fn with_incoming_token(mut self, token: impl Into<String>) -> Self {
        self.incoming_token = Some(token.into());
        self
    }

    /// Check an adapter's callback token
    pub fn authenticates(&self, token: &str) -> bool {
        self.incoming_token.as_deref() == Some(token)
    }
}

/// Lowercase a bridge name and reject characters outside `[a-z0-9_-]`
pub fn normalize_name(name: &str) -> Result<String, ConfigError> {
    let normalized = name.trim().to_lowercase();
    let valid = !normalized.is_empty()
        && normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(normalized)
    } else {
        Err(ConfigError::InvalidBridgeName(name.to_string()))
    }
}
