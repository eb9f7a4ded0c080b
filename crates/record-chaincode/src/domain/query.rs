//! # Rich Queries
//!
//! CouchDB-style selector documents submitted to the host's rich-query
//! facility. Only meaningful when the host state store supports them.

use crate::domain::entities::DocumentType;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A rich query: `{"selector": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichQuery {
    /// Field name to condition.
    #[serde(default)]
    pub selector: Map<String, Value>,
}

impl RichQuery {
    /// Match records of `document_type` whose `id` equals `value`.
    ///
    /// The document type is matched as a regex over the storage key (`_id`),
    /// which starts with the type tag.
    #[must_use]
    pub fn by_id(document_type: DocumentType, value: Value) -> Self {
        let mut selector = Map::new();
        selector.insert("id".to_string(), json!({ "$eq": value }));
        selector.insert("_id".to_string(), json!({ "$regex": document_type.tag() }));
        Self { selector }
    }

    /// Query text handed to the host.
    pub fn to_query_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
