//! # Record Chaincode Service
//!
//! Entry point the host drives: `init` and `invoke`.
//!
//! ## Invocation vector
//!
//! `[operationKind, documentTypeTag, methodName, jsonPayload?]`
//!
//! - `operationKind` must be `invoke` or `query`
//! - `jsonPayload` defaults to `{}` when absent or empty
//!
//! Every failure leaves as a JSON error value on the host error channel.
//! Failures without a catalog name are reported as `CHAINCODE_ERROR`.

use crate::adapters::state_accessor::StateAccessor;
use crate::dispatcher::run_operation;
use crate::domain::catalog::ErrorCatalog;
use crate::domain::entities::OperationKind;
use crate::errors::{ChaincodeError, ErrorKind, InvokeError};
use crate::handlers::HandlerContext;
use crate::ports::inbound::{Chaincode, ChaincodeResponse};
use crate::ports::outbound::ChaincodeStub;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::field::Empty;
use tracing::{error, info, instrument, warn, Span};

/// The record chaincode.
#[derive(Debug, Clone)]
pub struct RecordChaincode {
    catalog: Arc<ErrorCatalog>,
}

impl RecordChaincode {
    /// Create a chaincode using `catalog` for every error it reports.
    #[must_use]
    pub fn new(catalog: Arc<ErrorCatalog>) -> Self {
        Self { catalog }
    }

    /// Error catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &ErrorCatalog {
        &self.catalog
    }

    /// Parse the invocation vector and run the operation.
    #[instrument(
        skip_all,
        fields(tx_id = %stub.tx_id(), operation = Empty, document_type = Empty)
    )]
    async fn execute(&self, stub: &dyn ChaincodeStub) -> Result<Vec<u8>, InvokeError> {
        info!("Start Invoke transaction");

        let args = stub.args();
        let arg = |i: usize| args.get(i).map_or("", String::as_str);
        let (operation, category, method) = (arg(0), arg(1), arg(2));

        let payload = match arg(3) {
            "" => Value::Object(Map::new()),
            raw => serde_json::from_str(raw)?,
        };

        let span = Span::current();
        span.record("operation", operation);
        span.record("document_type", category);
        info!(method = %method, "Chaincode operation");

        if OperationKind::parse(operation).is_none() {
            warn!(operation = %operation, "Unknown chaincode operation type");
            return Err(self.catalog.error(ErrorKind::UnknownOperationType).into());
        }

        let ctx = HandlerContext {
            state: StateAccessor::new(stub),
            catalog: &self.catalog,
        };
        let payload = run_operation(&ctx, category, method, payload).await?;
        self.require_payload(payload)
    }

    /// Only a non-empty result counts as success; an empty one is reported
    /// as `CHAINCODE_ERROR`.
    fn require_payload(&self, payload: Vec<u8>) -> Result<Vec<u8>, InvokeError> {
        if payload.is_empty() {
            error!("Operation returned an empty payload");
            return Err(self.catalog.error(ErrorKind::Chaincode).into());
        }
        Ok(payload)
    }

    /// Structured error reported for `err`.
    fn reported(&self, err: InvokeError) -> ChaincodeError {
        match err {
            InvokeError::Named(named) => {
                warn!(error = %named, "Invocation failed");
                named
            }
            other => {
                error!(error = %other, "Invocation failed with unstructured error");
                self.catalog.error(ErrorKind::Chaincode)
            }
        }
    }
}

#[async_trait]
impl Chaincode for RecordChaincode {
    async fn init(&self, stub: &dyn ChaincodeStub) -> ChaincodeResponse {
        info!(tx_id = %stub.tx_id(), "Init");
        ChaincodeResponse::success(Vec::new())
    }

    async fn invoke(&self, stub: &dyn ChaincodeStub) -> ChaincodeResponse {
        match self.execute(stub).await {
            Ok(payload) => ChaincodeResponse::success(payload),
            Err(err) => ChaincodeResponse::error(self.reported(err).to_json()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
