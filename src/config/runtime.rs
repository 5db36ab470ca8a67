//! Runtime configuration
//!
//! Loaded from a YAML file:
//!
//! ```yaml
//! bridge_response_url: "https://node.example.com"
//!
//! transport:
//!   timeout_ms: 15000
//!
//! bridges:
//!   randomnumber:
//!     url: "http://localhost:8080/random"
//!     outgoing_token: "out-secret"
//!     incoming_token: "in-secret"
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use super::bridge_type::{normalize_name, BridgeType};
use super::ConfigError;

/// Environment variable overriding `bridge_response_url`
pub const BRIDGE_RESPONSE_URL_ENV: &str = "BRIDGE_RESPONSE_URL";

const BRIDGE_RESPONSE_URL_KEY: &str = "bridge_response_url";

/// Settings handed to the HTTP transport
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TransportConfig {
    /// Request timeout in milliseconds. No timeout when unset.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RuntimeConfig {
    /// Base URL external adapters call back on. When unset, adapters are
    /// expected to answer synchronously.
    #[serde(default, deserialize_with = "deserialize_optional_url")]
    pub bridge_response_url: Option<Url>,

    #[serde(default)]
    pub bridges: HashMap<String, BridgeType>,

    #[serde(default)]
    pub transport: TransportConfig,
}

impl RuntimeConfig {
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: RuntimeConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml {
                file: path.display().to_string(),
                error: e,
            })?;
        config.normalized()
    }

    /// Key bridges by normalized name and copy the key into each bridge
    fn normalized(self) -> Result<Self, ConfigError> {
        let mut bridges = HashMap::with_capacity(self.bridges.len());
        for (key, mut bridge) in self.bridges {
            let name = normalize_name(&key)?;
            bridge.name = name.clone();
            bridges.insert(name, bridge);
        }
        Ok(Self { bridges, ..self })
    }

    /// Apply overrides from the process environment
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        let value = std::env::var(BRIDGE_RESPONSE_URL_ENV).ok();
        self.override_response_url(value.as_deref(), BRIDGE_RESPONSE_URL_ENV)
    }

    /// Override the callback base URL. `None` keeps the configured value and
    /// an empty string clears it.
    pub fn with_response_url_override(self, value: Option<&str>) -> Result<Self, ConfigError> {
        self.override_response_url(value, BRIDGE_RESPONSE_URL_KEY)
    }

    fn override_response_url(
        mut self,
        value: Option<&str>,
        source_name: &str,
    ) -> Result<Self, ConfigError> {
        match value {
            None => {}
            Some(raw) => {
                self.bridge_response_url =
                    parse_optional_url(raw).map_err(|error| ConfigError::InvalidUrl {
                        source_name: source_name.to_string(),
                        error,
                    })?;
            }
        }
        Ok(self)
    }

    /// Look up a bridge by name (case-insensitive)
    pub fn bridge(&self, name: &str) -> Result<&BridgeType, ConfigError> {
        let key = normalize_name(name)?;
        self.bridges
            .get(&key)
            .ok_or_else(|| ConfigError::UnknownBridge(name.to_string()))
    }
}

/// Blank means unset
fn parse_optional_url(raw: &str) -> Result<Option<Url>, url::ParseError> {
    match raw.trim() {
        "" => Ok(None),
        trimmed => Url::parse(trimmed).map(Some),
    }
}

fn deserialize_optional_url<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_optional_url(&raw).map_err(serde::de::Error::custom),
    }
}
