//! # Operation Dispatcher
//!
//! Resolves `(document type tag, method name)` to a handler call.
//!
//! The registry is a closed match over `DocumentType`: a new record kind is
//! a new variant plus a new arm here.

use crate::domain::entities::DocumentType;
use crate::errors::{ErrorKind, InvokeError};
use crate::handlers::{HandlerContext, Method, RecordHandler, SampleDataHandler};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Handler registered for `document_type`.
#[must_use]
pub fn handler_for(document_type: DocumentType) -> &'static dyn RecordHandler {
    match document_type {
        DocumentType::SampleData => &SampleDataHandler,
    }
}

/// Resolve and run one operation. The handler result is returned unchanged.
///
/// # Errors
///
/// - `UNKNOWN_DATA_CATEGORY` if `document_type_tag` is not registered
/// - `UNKNOWN_METHOD_ERROR` (context: `methodName`) if the handler does not
///   expose `method_name`
/// - whatever the handler raises
pub async fn run_operation(
    ctx: &HandlerContext<'_>,
    document_type_tag: &str,
    method_name: &str,
    payload: Value,
) -> Result<Vec<u8>, InvokeError> {
    let Some(document_type) = DocumentType::from_tag(document_type_tag) else {
        warn!(document_type = %document_type_tag, "Unknown document type");
        return Err(ctx.catalog.error(ErrorKind::UnknownDataCategory).into());
    };

    let handler = handler_for(document_type);
    let Some(method) = Method::parse(method_name).filter(|m| handler.supports(*m)) else {
        warn!(document_type = %document_type, method = %method_name, "Unknown method");
        return Err(ctx
            .catalog
            .error_with(ErrorKind::UnknownMethod, &json!({ "methodName": method_name }))
            .into());
    };

    debug!(document_type = %document_type, method = %method, "Dispatching operation");
    handler.handle(ctx, method, payload).await
}

// =============================================================================
// TESTS
// =============================================================================
