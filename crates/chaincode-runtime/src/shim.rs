//! # Peer Shim
//!
//! Line protocol between a terminal (or script) and the chaincode.
//!
//! Each input line is a JSON array holding one invocation vector:
//!
//! ```text
//! ["invoke", "sampleData", "create", {"id": 7, "firstName": "Ann"}]
//! ["query", "sampleData", "get", 7]
//! ```
//!
//! String elements are passed through as-is; anything else is passed as its
//! JSON text. Each response is printed as one JSON object:
//!
//! ```text
//! {"status":200,"payload":"success"}
//! {"status":500,"message":"{\"name\":\"KEY_NOT_FOUND\",...}"}
//! ```

use record_chaincode::prelude::{Chaincode, ChaincodeResponse, InMemoryLedger};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

/// A line that is not an invocation vector.
#[derive(Debug, Error)]
pub enum ShimError {
    /// Line is not valid JSON.
    #[error("invocation line is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Line is JSON but not an array.
    #[error("invocation line must be a JSON array")]
    NotArray,
}

/// Parse one input line into host arguments.
pub fn parse_invocation(line: &str) -> Result<Vec<String>, ShimError> {
    let Value::Array(items) = serde_json::from_str(line)? else {
        return Err(ShimError::NotArray);
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

/// Render a host response as one output line.
pub fn render_response(response: &ChaincodeResponse) -> String {
    let body = match response {
        ChaincodeResponse::Success { payload } => json!({
            "status": response.status(),
            "payload": String::from_utf8_lossy(payload),
        }),
        ChaincodeResponse::Error { message } => json!({
            "status": response.status(),
            "message": message,
        }),
    };
    body.to_string()
}

/// Run one input line against `chaincode` as a fresh transaction.
pub async fn run_line<C: Chaincode + ?Sized>(
    chaincode: &C,
    ledger: &InMemoryLedger,
    line: &str,
) -> Result<String, ShimError> {
    let args = parse_invocation(line)?;
    debug!(?args, "Submitting invocation");
    let stub = ledger.stub(args);
    let response = chaincode.invoke(&stub).await;
    Ok(render_response(&response))
}
