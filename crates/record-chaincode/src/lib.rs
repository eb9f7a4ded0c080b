//! # Record Chaincode - Key-Value Record Manager
//!
//! **Runs as:** a smart-contract module inside a permissioned ledger
//! **Host contract:** `getState`, `putState`, `deleteState`, `getQueryResult`
//!
//! ## Purpose
//!
//! Maps invocation arguments to create/read/update/query calls against the
//! host's key-value state, validating payload shape on the way in. The host
//! owns consensus, persistence, iterator semantics and transaction ordering.
//!
//! ## Flow
//!
//! ```text
//! host ──invoke──→ RecordChaincode (service.rs)
//!                      │
//!                      ↓
//!                  run_operation (dispatcher.rs)
//!                      │
//!                      ↓
//!                  SampleDataHandler (handlers/)
//!                   │            │
//!                   ↓            ↓
//!             Schema        StateAccessor ──→ ChaincodeStub (host)
//! ```
//!
//! ## Error Taxonomy
//!
//! | Name | Raised by |
//! |------|-----------|
//! | `UNKNOWN_CHAINCODE_OPERATION_TYPE` | `service.rs` |
//! | `UNKNOWN_DATA_CATEGORY` | `dispatcher.rs` |
//! | `UNKNOWN_METHOD_ERROR` | `dispatcher.rs` |
//! | `KEY_NOT_FOUND` | `handlers/sample_data.rs` |
//! | `VALIDATION_ERRORS_ENCOUNTERED` | `handlers/mod.rs` |
//! | `CHAINCODE_ERROR` | `service.rs` (catch-all) |
//!
//! ## Usage Example
//!
//! ```ignore
//! use record_chaincode::prelude::*;
//!
//! let catalog = Arc::new(ErrorCatalog::builtin()?);
//! let chaincode = RecordChaincode::new(catalog);
//!
//! let ledger = InMemoryLedger::new();
//! let stub = ledger.stub(vec!["query".into(), "sampleData".into(), "get".into(), "7".into()]);
//! let response = chaincode.invoke(&stub).await;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::catalog::{CatalogEntry, ErrorCatalog, BUILTIN_CATALOG};
    pub use crate::domain::entities::{
        generate_key, key_id, stamp_document_type, Document, DocumentType, OperationKind,
        DOCUMENT_TYPE_FIELD,
    };
    pub use crate::domain::query::RichQuery;
    pub use crate::domain::schema::{FieldKind, FieldRule, Schema, ValidationErrors};

    // Ports
    pub use crate::ports::inbound::{Chaincode, ChaincodeResponse};
    pub use crate::ports::outbound::{ChaincodeStub, KeyValue, StateQueryIterator};

    // Adapters
    pub use crate::adapters::{InMemoryLedger, InMemoryStub, StateAccessor};

    // Handlers and dispatch
    pub use crate::dispatcher::{handler_for, run_operation};
    pub use crate::handlers::{
        HandlerContext, Method, RecordHandler, SampleDataHandler, SAMPLE_DATA_SCHEMA, SUCCESS,
    };

    // Errors
    pub use crate::errors::{CatalogError, ChaincodeError, ErrorKind, InvokeError, StateError};

    // Service
    pub use crate::service::RecordChaincode;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chaincode name.
pub const CHAINCODE_NAME: &str = "record-chaincode";

// =============================================================================
// TESTS
// =============================================================================
