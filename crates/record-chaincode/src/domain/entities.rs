//! # Domain Entities
//!
//! Document types, stored documents, and the invocation vocabulary.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field carrying the system-assigned document type.
pub const DOCUMENT_TYPE_FIELD: &str = "documentType";

// =============================================================================
// DOCUMENT TYPE
// =============================================================================

/// Closed set of document types this chaincode manages.
///
/// Adding a record kind means adding a variant here and a handler in
/// `handlers/`; the dispatcher match is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Sample data records (`id`, `firstName`, `lastName`).
    SampleData,
}

impl DocumentType {
    /// Every registered document type.
    pub const ALL: [DocumentType; 1] = [DocumentType::SampleData];

    /// Wire tag, also the storage key namespace.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::SampleData => "sampleData",
        }
    }

    /// Human-readable label used in error context.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SampleData => "Sample data",
        }
    }

    /// Resolve a wire tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// OPERATION KIND
// =============================================================================

/// First element of the invocation vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// State-changing transaction.
    Invoke,
    /// Read-only query.
    Query,
}

impl OperationKind {
    /// Parse the wire form.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "invoke" => Some(Self::Invoke),
            "query" => Some(Self::Query),
            _ => None,
        }
    }
}

// =============================================================================
// KEYS
// =============================================================================

/// Storage key for a record: document type tag followed by the id, no
/// separator.
#[must_use]
pub fn generate_key(document_type: &str, key_id: &str) -> String {
    format!("{document_type}{key_id}")
}

/// Render an id taken from a JSON payload into its key form.
///
/// Strings are used verbatim and numbers by their numeric value, so `7`,
/// `7.0` and `"7"` address the same record. Anything else is rendered as its
/// JSON text.
#[must_use]
pub fn key_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_key(n),
        other => other.to_string(),
    }
}

fn number_key(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    // f64 Display drops a zero fraction: 7.0 renders as "7".
    n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// A stored record: a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(pub Map<String, Value>);

impl Document {
    /// Decode stored bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Field lookup.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The record id, if present.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    /// Overwrite fields with `fields`; everything else is preserved.
    pub fn merge(&mut self, fields: Map<String, Value>) {
        for (key, value) in fields {
            self.0.insert(key, value);
        }
    }
}

/// Stamp the document type onto a single JSON object or onto every object
/// in a JSON array. Other values are left untouched.
pub fn stamp_document_type(document_type: DocumentType, data: &mut Value) {
    let tag = Value::String(document_type.tag().to_string());
    match data {
        Value::Object(fields) => {
            fields.insert(DOCUMENT_TYPE_FIELD.to_string(), tag);
        }
        Value::Array(items) => {
            for item in items.iter_mut().filter_map(Value::as_object_mut) {
                item.insert(DOCUMENT_TYPE_FIELD.to_string(), tag.clone());
            }
        }
        _ => {}
    }
}

// =============================================================================
// TESTS
// =============================================================================
