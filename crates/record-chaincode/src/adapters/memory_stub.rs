//! # In-Memory Host
//!
//! In-memory ledger state implementing the host stub, for tests and the
//! development runtime. A production host is the ledger peer itself.
//!
//! Rich queries understand the selector subset this chaincode issues:
//! `$eq`, `$regex` and bare equality, with `_id` bound to the storage key.

use crate::domain::query::RichQuery;
use crate::errors::StateError;
use crate::ports::outbound::{ChaincodeStub, KeyValue, StateQueryIterator};
use async_trait::async_trait;
use parking_lot::RwLock;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Selector field bound to the storage key.
const KEY_FIELD: &str = "_id";

// =============================================================================
// LEDGER
// =============================================================================

/// Shared in-memory world state. Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    state: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
    open_cursors: Arc<AtomicUsize>,
    rich_queries: bool,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    /// Empty ledger with rich-query support.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(BTreeMap::new())),
            open_cursors: Arc::new(AtomicUsize::new(0)),
            rich_queries: true,
        }
    }

    /// Empty ledger whose store rejects rich queries.
    #[must_use]
    pub fn without_rich_queries() -> Self {
        Self {
            rich_queries: false,
            ..Self::new()
        }
    }

    /// Preload `{key: record}` entries, each record stored as JSON.
    pub fn load_snapshot(&self, snapshot: &Map<String, Value>) -> Result<usize, serde_json::Error> {
        let mut state = self.state.write();
        for (key, record) in snapshot {
            state.insert(key.clone(), serde_json::to_vec(record)?);
        }
        Ok(snapshot.len())
    }

    /// Handle for one transaction carrying `args`.
    #[must_use]
    pub fn stub(&self, args: Vec<String>) -> InMemoryStub {
        InMemoryStub {
            ledger: self.clone(),
            tx_id: Uuid::new_v4().to_string(),
            args,
        }
    }

    /// Returns true if a value is stored at `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.read().contains_key(key)
    }

    /// Stored bytes at `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.state.read().get(key).cloned()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Query cursors handed out and not yet closed.
    #[must_use]
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    fn execute(&self, query: &str) -> Result<VecDeque<KeyValue>, StateError> {
        if !self.rich_queries {
            return Err(StateError::QueryUnsupported);
        }

        let query: RichQuery =
            serde_json::from_str(query).map_err(|e| StateError::InvalidQuery(e.to_string()))?;
        let conditions = query
            .selector
            .iter()
            .map(|(field, condition)| Condition::compile(field, condition))
            .collect::<Result<Vec<_>, _>>()?;

        let state = self.state.read();
        let matches = state
            .iter()
            .filter(|(key, bytes)| {
                let Ok(Value::Object(doc)) = serde_json::from_slice::<Value>(bytes) else {
                    return false;
                };
                conditions.iter().all(|c| c.matches(key, &doc))
            })
            .map(|(key, bytes)| KeyValue {
                key: key.clone(),
                value: bytes.clone(),
            })
            .collect();
        Ok(matches)
    }
}

// =============================================================================
// SELECTOR MATCHING
// =============================================================================

enum Test {
    Eq(Value),
    Regex(Regex),
}

struct Condition {
    field: String,
    tests: Vec<Test>,
}

impl Condition {
    fn compile(field: &str, condition: &Value) -> Result<Self, StateError> {
        let tests = match condition {
            Value::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => ops
                .iter()
                .map(|(op, operand)| match (op.as_str(), operand) {
                    ("$eq", value) => Ok(Test::Eq(value.clone())),
                    ("$regex", Value::String(pattern)) => Regex::new(pattern)
                        .map(Test::Regex)
                        .map_err(|e| StateError::InvalidQuery(e.to_string())),
                    (other, _) => Err(StateError::InvalidQuery(format!(
                        "unsupported operator {other} on {field}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            value => vec![Test::Eq(value.clone())],
        };
        Ok(Self {
            field: field.to_string(),
            tests,
        })
    }

    fn matches(&self, key: &str, doc: &Map<String, Value>) -> bool {
        let key_value;
        let subject = if self.field == KEY_FIELD {
            key_value = Value::String(key.to_string());
            Some(&key_value)
        } else {
            doc.get(&self.field)
        };

        let Some(subject) = subject else {
            return false;
        };
        self.tests.iter().all(|test| match test {
            Test::Eq(expected) => json_eq(subject, expected),
            Test::Regex(re) => subject.as_str().is_some_and(|s| re.is_match(s)),
        })
    }
}

/// Equality as the query engine sees it: numbers compare by value, so `7`
/// matches `7.0`.
#[allow(clippy::float_cmp)]
fn json_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_f64(), r.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => l == r,
        },
        _ => left == right,
    }
}

// =============================================================================
// STUB
// =============================================================================

/// One transaction's view of an `InMemoryLedger`.
#[derive(Debug, Clone)]
pub struct InMemoryStub {
    ledger: InMemoryLedger,
    tx_id: String,
    args: Vec<String>,
}

#[async_trait]
impl ChaincodeStub for InMemoryStub {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    async fn get_state(&self, key: &str) -> Result<Vec<u8>, StateError> {
        Ok(self.ledger.raw(key).unwrap_or_default())
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        self.ledger.state.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete_state(&self, key: &str) -> Result<(), StateError> {
        self.ledger.state.write().remove(key);
        Ok(())
    }

    async fn get_query_result(
        &self,
        query: &str,
    ) -> Result<Box<dyn StateQueryIterator>, StateError> {
        let results = self.ledger.execute(query)?;
        self.ledger.open_cursors.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryCursor {
            results,
            open: Some(Arc::clone(&self.ledger.open_cursors)),
        }))
    }
}

/// Cursor over a materialized result set.
struct InMemoryCursor {
    results: VecDeque<KeyValue>,
    open: Option<Arc<AtomicUsize>>,
}

#[async_trait]
impl StateQueryIterator for InMemoryCursor {
    async fn next(&mut self) -> Result<Option<KeyValue>, StateError> {
        if self.open.is_none() {
            return Err(StateError::Iterator("cursor already closed".to_string()));
        }
        Ok(self.results.pop_front())
    }

    async fn close(&mut self) -> Result<(), StateError> {
        if let Some(counter) = self.open.take() {
            counter.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
