//! Runtime configuration
//!
//! This module contains:
//! - `bridge_type` - External adapter definitions (URL and tokens)
//! - `runtime` - Callback URL, registered bridges, and transport settings,
//!   loaded from a YAML file with environment overrides

pub mod bridge_type;
pub mod runtime;

pub use bridge_type::BridgeType;
pub use runtime::{RuntimeConfig, TransportConfig, BRIDGE_RESPONSE_URL_ENV};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error in {file}: {error}")]
    Yaml {
        file: String,
        error: serde_yaml::Error,
    },

    #[error("Invalid bridge name: {0:?}")]
    InvalidBridgeName(String),

    #[error("Unknown bridge: {0}")]
    UnknownBridge(String),

    #[error("Transport setup failed: {0}")]
    Transport(String),

    #[error("Invalid URL in {source_name}: {error}")]
    InvalidUrl {
        source_name: String,
        error: url::ParseError,
    },
}
