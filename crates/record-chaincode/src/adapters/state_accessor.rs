//! # State Accessor
//!
//! Key derivation plus get/put/delete/query over the host stub.
//!
//! This layer performs no retries and no staging. Durability and
//! cross-transaction visibility belong to the host.

use crate::domain::entities::{generate_key, DocumentType};
use crate::domain::query::RichQuery;
use crate::errors::{InvokeError, StateError};
use crate::ports::outbound::{ChaincodeStub, StateQueryIterator};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Record-level access to the host state store for one invocation.
pub struct StateAccessor<'a> {
    stub: &'a dyn ChaincodeStub,
}

impl<'a> StateAccessor<'a> {
    /// Wrap the stub of the current invocation.
    #[must_use]
    pub fn new(stub: &'a dyn ChaincodeStub) -> Self {
        Self { stub }
    }

    /// Raw bytes stored for `(document_type, key_id)`; empty if absent.
    pub async fn get_data(
        &self,
        document_type: DocumentType,
        key_id: &str,
    ) -> Result<Vec<u8>, StateError> {
        let key = generate_key(document_type.tag(), key_id);
        debug!(key = %key, "get_state");
        self.stub.get_state(&key).await
    }

    /// Serialize `record` as JSON and store it under `(document_type, key_id)`.
    pub async fn put_data<T: Serialize + ?Sized>(
        &self,
        document_type: DocumentType,
        key_id: &str,
        record: &T,
    ) -> Result<(), InvokeError> {
        let key = generate_key(document_type.tag(), key_id);
        let bytes = serde_json::to_vec(record)?;
        debug!(key = %key, bytes = bytes.len(), "put_state");
        self.stub.put_state(&key, bytes).await?;
        Ok(())
    }

    /// Remove the entry stored under `(document_type, key_id)`.
    pub async fn delete_data(
        &self,
        document_type: DocumentType,
        key_id: &str,
    ) -> Result<(), StateError> {
        let key = generate_key(document_type.tag(), key_id);
        debug!(key = %key, "delete_state");
        self.stub.delete_state(&key).await
    }

    /// Run `query`, drain every result and return them as a JSON array.
    ///
    /// The cursor is closed whether or not draining succeeds. A drain error
    /// takes precedence over a close error.
    pub async fn get_data_by_query(&self, query: &RichQuery) -> Result<Vec<u8>, InvokeError> {
        let text = query.to_query_string()?;
        debug!(query = %text, "get_query_result");

        let mut cursor = self.stub.get_query_result(&text).await?;
        let drained = drain(cursor.as_mut()).await;
        let closed = cursor.close().await;

        let records = drained?;
        closed?;

        debug!(records = records.len(), "query drained");
        Ok(serde_json::to_vec(&records)?)
    }
}

/// Read the cursor to exhaustion, decoding every non-empty value.
async fn drain(cursor: &mut dyn StateQueryIterator) -> Result<Vec<Value>, InvokeError> {
    let mut records = Vec::new();
    while let Some(entry) = cursor.next().await? {
        if entry.value.is_empty() {
            continue;
        }
        records.push(serde_json::from_slice(&entry.value)?);
    }
    Ok(records)
}

// =============================================================================
// TESTS
// =============================================================================
