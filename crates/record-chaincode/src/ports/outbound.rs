//! # Driven Ports (SPI - Outbound)
//!
//! The host ledger interface this chaincode depends on. The host owns
//! persistence, ordering, commit and rollback; nothing here assumes more
//! than the input/output contract of each call.

use crate::errors::StateError;
use async_trait::async_trait;

// =============================================================================
// QUERY RESULTS
// =============================================================================

/// One entry yielded by a rich-query cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// Storage key.
    pub key: String,
    /// Stored bytes.
    pub value: Vec<u8>,
}

/// Cursor over rich-query results.
///
/// Callers must call `close` once they stop reading, whether or not the
/// cursor was drained.
#[async_trait]
pub trait StateQueryIterator: Send {
    /// Next entry, or `None` when exhausted.
    async fn next(&mut self) -> Result<Option<KeyValue>, StateError>;

    /// Release the cursor.
    async fn close(&mut self) -> Result<(), StateError>;
}

// =============================================================================
// CHAINCODE STUB
// =============================================================================

/// Per-transaction handle onto the host ledger.
///
/// ## Implementation Notes
///
/// - `get_state` returns an empty vector for absent keys, never an error.
/// - Writes are visible to later reads in the same transaction; their fate
///   after the transaction is up to the host.
#[async_trait]
pub trait ChaincodeStub: Send + Sync {
    /// Host transaction id.
    fn tx_id(&self) -> &str;

    /// Positional invocation arguments.
    fn args(&self) -> &[String];

    /// Read the value at `key` (empty if absent).
    async fn get_state(&self, key: &str) -> Result<Vec<u8>, StateError>;

    /// Write `value` at `key`.
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StateError>;

    /// Remove `key`.
    async fn delete_state(&self, key: &str) -> Result<(), StateError>;

    /// Run a rich query against the state store.
    async fn get_query_result(
        &self,
        query: &str,
    ) -> Result<Box<dyn StateQueryIterator>, StateError>;
}
