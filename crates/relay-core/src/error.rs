//! # Relay Error Types
//!
//! Typed error handling for the order relay.
//! All relay operations return `Result<T, RelayError>`.

use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing or invalid caller input; never reaches the gateway
    #[error("{0}")]
    BadRequest(String),

    /// Gateway explicitly reported a non-success result
    #[error("Gateway rejected the request: {response}")]
    GatewayRejected { response: serde_json::Value },

    /// Network/transport/parsing failure reaching the gateway
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Callback checksum missing or invalid
    #[error("Checksum mismatched")]
    ChecksumMismatch,

    /// Configuration errors (missing env vars, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Order store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RelayError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::BadRequest(_) => 400,
            RelayError::GatewayRejected { .. } => 400,
            RelayError::Upstream(_) => 500,
            RelayError::ChecksumMismatch => 400,
            RelayError::Configuration(_) => 500,
            RelayError::Storage(_) => 500,
            RelayError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
