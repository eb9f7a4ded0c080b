//! # Chaincode Runtime
//!
//! Development host for the record chaincode. Replaces the ledger peer with
//! an in-memory state store and a line-oriented stdin/stdout protocol.
//!
//! ## Modules
//!
//! - `config`: environment configuration
//! - `logging`: tracing subscriber setup
//! - `shim`: invocation line parsing and response rendering

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logging;
pub mod shim;

pub use config::{ConfigError, RuntimeConfig};
pub use logging::init_logging;
pub use shim::{parse_invocation, render_response, run_line, ShimError};
