//! # Record Handlers
//!
//! One handler per document type. A handler owns its schema and implements
//! the methods it exposes on top of the state accessor.

pub mod sample_data;

pub use sample_data::*;

use crate::adapters::state_accessor::StateAccessor;
use crate::domain::catalog::ErrorCatalog;
use crate::domain::entities::DocumentType;
use crate::domain::schema::Schema;
use crate::errors::{ChaincodeError, ErrorKind, InvokeError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

/// Payload returned by mutating methods.
pub const SUCCESS: &[u8] = b"success";

// =============================================================================
// METHODS
// =============================================================================

/// Method names a handler may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Validate and store a new record.
    Create,
    /// Read one record by id.
    Get,
    /// Validate and merge fields into an existing record.
    Update,
    /// Rich query by id within the document type.
    GetAllByFilter,
}

impl Method {
    /// Every known method.
    pub const ALL: [Method; 4] = [
        Method::Create,
        Method::Get,
        Method::Update,
        Method::GetAllByFilter,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::Update => "update",
            Self::GetAllByFilter => "getAllByFilter",
        }
    }

    /// Resolve a wire name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// HANDLER CONTRACT
// =============================================================================

/// What a handler gets for one invocation.
pub struct HandlerContext<'a> {
    /// State access for the current transaction.
    pub state: StateAccessor<'a>,
    /// Error catalog for formatting failures.
    pub catalog: &'a ErrorCatalog,
}

/// Implements the methods of one document type.
#[async_trait]
pub trait RecordHandler: Send + Sync {
    /// Document type served.
    fn document_type(&self) -> DocumentType;

    /// Methods exposed to the dispatcher.
    fn methods(&self) -> &'static [Method];

    /// Returns true if `method` is exposed.
    fn supports(&self, method: Method) -> bool {
        self.methods().contains(&method)
    }

    /// Run `method` with `payload`.
    async fn handle(
        &self,
        ctx: &HandlerContext<'_>,
        method: Method,
        payload: Value,
    ) -> Result<Vec<u8>, InvokeError>;
}

/// Validate `data` against `schema`, turning violations into a
/// `VALIDATION_ERRORS_ENCOUNTERED` error.
pub fn validate_data(
    catalog: &ErrorCatalog,
    schema: &Schema,
    data: &Value,
) -> Result<Map<String, Value>, ChaincodeError> {
    schema
        .validate(data)
        .map_err(|violations| catalog.error_with(ErrorKind::ValidationErrors, &violations.to_context()))
}
