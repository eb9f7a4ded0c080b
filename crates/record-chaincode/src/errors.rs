//! # Error Types
//!
//! All error types for record chaincode execution.
//!
//! `ChaincodeError` is the structured value handed to the host on failure.
//! The other enums describe failures that have no catalog name of their own;
//! the entry point replaces them with `CHAINCODE_ERROR` before reporting.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// SYMBOLIC NAMES
// =============================================================================

/// Symbolic names of the errors this chaincode raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Document type tag is not registered.
    UnknownDataCategory,
    /// Resolved handler does not expose the requested method.
    UnknownMethod,
    /// Operation kind is neither `invoke` nor `query`.
    UnknownOperationType,
    /// No record stored under the derived key.
    KeyNotFound,
    /// Payload failed schema validation.
    ValidationErrors,
    /// Catch-all for failures without a catalog name.
    Chaincode,
}

impl ErrorKind {
    /// Catalog key for this error.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownDataCategory => "UNKNOWN_DATA_CATEGORY",
            Self::UnknownMethod => "UNKNOWN_METHOD_ERROR",
            Self::UnknownOperationType => "UNKNOWN_CHAINCODE_OPERATION_TYPE",
            Self::KeyNotFound => "KEY_NOT_FOUND",
            Self::ValidationErrors => "VALIDATION_ERRORS_ENCOUNTERED",
            Self::Chaincode => "CHAINCODE_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CHAINCODE ERROR (host-facing)
// =============================================================================

/// Structured error value reported to the host.
///
/// Serializes to `{name, message, statusCode, status, object}`. A missing
/// status code renders as an empty string.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{name}: {message}")]
#[serde(rename_all = "camelCase")]
pub struct ChaincodeError {
    /// Catalog name, or the symbolic name when the catalog has no entry.
    pub name: String,
    /// Human-readable message.
    pub message: String,
    /// HTTP-style status code.
    #[serde(with = "status_field")]
    pub status_code: Option<u16>,
    /// Same value as `status_code`.
    #[serde(with = "status_field")]
    pub status: Option<u16>,
    /// Caller-supplied context.
    #[serde(default)]
    pub object: Map<String, Value>,
}

impl ChaincodeError {
    /// Returns true if this error carries the given symbolic name.
    #[must_use]
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.name == kind.as_str()
    }

    /// Serialize to the JSON text sent over the host error channel.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Only strings, integers and JSON values inside; cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"name\":\"{}\"}}", self.name))
    }
}

mod status_field {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u16>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(code) => serializer.serialize_u16(*code),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u16>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Some(code),
            Raw::Text(text) => text.parse().ok(),
        })
    }
}

// =============================================================================
// STATE ERRORS
// =============================================================================

/// Errors from the host state store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Host could not be reached.
    #[error("state store unavailable: {0}")]
    Unavailable(String),

    /// Rich queries are not supported by the backing store.
    #[error("rich queries not supported by this state store")]
    QueryUnsupported,

    /// Query text could not be parsed or executed.
    #[error("invalid rich query: {0}")]
    InvalidQuery(String),

    /// Result cursor failed while draining or closing.
    #[error("query iterator error: {0}")]
    Iterator(String),
}

// =============================================================================
// CATALOG ERRORS
// =============================================================================

/// Errors raised while loading an error catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read error catalog {path:?}: {source}")]
    Io {
        /// Catalog location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Catalog text is not a valid catalog document.
    #[error("malformed error catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// INVOKE ERRORS
// =============================================================================

/// Error type flowing through handlers and the dispatcher.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// A catalog-named error, reported to the host unchanged.
    #[error(transparent)]
    Named(#[from] ChaincodeError),

    /// Host state failure.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Stored bytes or payload could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InvokeError {
    /// Returns the structured error if this one carries a catalog name.
    #[must_use]
    pub fn as_named(&self) -> Option<&ChaincodeError> {
        match self {
            Self::Named(err) => Some(err),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
