//! # Driving Ports (API - Inbound)
//!
//! Lifecycle interface the host calls, and the response it expects back.

use crate::ports::outbound::ChaincodeStub;
use async_trait::async_trait;

/// Status reported with a successful response.
pub const STATUS_OK: u16 = 200;

/// Status reported with an error response.
pub const STATUS_ERROR: u16 = 500;

/// Response returned to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChaincodeResponse {
    /// Success carrying a byte payload (possibly empty for `init`).
    Success {
        /// Response bytes.
        payload: Vec<u8>,
    },
    /// Failure carrying a JSON-serialized error value.
    Error {
        /// Error text.
        message: String,
    },
}

impl ChaincodeResponse {
    /// Success with a payload.
    #[must_use]
    pub fn success(payload: impl Into<Vec<u8>>) -> Self {
        Self::Success {
            payload: payload.into(),
        }
    }

    /// Error with a message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Host status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Success { .. } => STATUS_OK,
            Self::Error { .. } => STATUS_ERROR,
        }
    }

    /// Returns true for a success response.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Success payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Success { payload } => Some(payload),
            Self::Error { .. } => None,
        }
    }

    /// Error message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message } => Some(message),
        }
    }
}

/// Chaincode lifecycle, as driven by the host.
#[async_trait]
pub trait Chaincode: Send + Sync {
    /// Called when the chaincode is deployed or upgraded.
    async fn init(&self, stub: &dyn ChaincodeStub) -> ChaincodeResponse;

    /// Called for every transaction or query.
    async fn invoke(&self, stub: &dyn ChaincodeStub) -> ChaincodeResponse;
}
