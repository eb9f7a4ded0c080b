//! Integration tests driving the chaincode the way a ledger peer would.

pub mod flows;
pub mod runtime;
