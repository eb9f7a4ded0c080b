//! # Error Catalog
//!
//! Immutable mapping from symbolic error name to `{name, message, statusCode}`.
//! Loaded once at start-up and passed explicitly to whoever formats errors.

use crate::errors::{CatalogError, ChaincodeError, ErrorKind};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Catalog shipped with the crate.
pub const BUILTIN_CATALOG: &str = include_str!("../../errors.json");

/// One catalog entry. Every field is optional; missing fields fall back
/// when formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Reported error name.
    #[serde(default)]
    pub name: Option<String>,
    /// Reported message.
    #[serde(default)]
    pub message: Option<String>,
    /// Reported status code.
    #[serde(default)]
    pub status_code: Option<u16>,
}

/// Error catalog keyed by symbolic name.
#[derive(Debug, Clone, Default)]
pub struct ErrorCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl ErrorCatalog {
    /// Load the built-in catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let entries: HashMap<String, CatalogEntry> = serde_json::from_str(text)?;
        Ok(Self { entries })
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build an error value for `name`, copying every key of `context` into
    /// its `object` field. Non-object context is ignored. Never fails.
    #[must_use]
    pub fn format(&self, name: &str, context: Option<&Value>) -> ChaincodeError {
        let entry = self.entries.get(name);
        let status_code = entry.and_then(|e| e.status_code);

        let object: Map<String, Value> = match context {
            Some(Value::Object(fields)) => fields.clone(),
            _ => Map::new(),
        };

        ChaincodeError {
            name: entry
                .and_then(|e| e.name.clone())
                .unwrap_or_else(|| name.to_string()),
            message: entry.and_then(|e| e.message.clone()).unwrap_or_default(),
            status_code,
            status: status_code,
            object,
        }
    }

    /// Format an error with no context.
    #[must_use]
    pub fn error(&self, kind: ErrorKind) -> ChaincodeError {
        self.format(kind.as_str(), None)
    }

    /// Format an error with context fields.
    #[must_use]
    pub fn error_with(&self, kind: ErrorKind, context: &Value) -> ChaincodeError {
        self.format(kind.as_str(), Some(context))
    }
}

// =============================================================================
// TESTS
// =============================================================================
