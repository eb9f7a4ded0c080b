//! # Runtime Configuration
//!
//! Configuration read from environment variables.

use record_chaincode::prelude::{CatalogError, ErrorCatalog, InMemoryLedger};
use record_chaincode::CHAINCODE_NAME;
use serde_json::{Map, Value};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// State snapshot could not be read.
    #[error("failed to read state snapshot {path:?}: {source}")]
    SnapshotIo {
        /// Snapshot location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// State snapshot is not a JSON object of records.
    #[error("malformed state snapshot {path:?}: {reason}")]
    SnapshotFormat {
        /// Snapshot location.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Name shown in log output.
    pub chaincode_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression).
    pub log_level: String,

    /// Emit JSON log lines instead of the pretty format.
    pub json_logs: bool,

    /// Error catalog replacing the built-in one.
    pub error_catalog: Option<PathBuf>,

    /// JSON object `{key: record}` preloaded into the ledger.
    pub state_snapshot: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            chaincode_name: CHAINCODE_NAME.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            error_catalog: None,
            state_snapshot: None,
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CHAINCODE_NAME`: name in log output (default: record-chaincode)
    /// - `CHAINCODE_LOG_LEVEL` or `RUST_LOG`: log filter (default: info)
    /// - `CHAINCODE_JSON_LOGS`: JSON log lines (default: false)
    /// - `CHAINCODE_ERROR_CATALOG`: path to a replacement error catalog
    /// - `CHAINCODE_STATE_SNAPSHOT`: path to a state snapshot to preload
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            chaincode_name: env::var("CHAINCODE_NAME").unwrap_or(defaults.chaincode_name),

            log_level: env::var("CHAINCODE_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: env::var("CHAINCODE_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),

            error_catalog: env::var_os("CHAINCODE_ERROR_CATALOG").map(PathBuf::from),

            state_snapshot: env::var_os("CHAINCODE_STATE_SNAPSHOT").map(PathBuf::from),
        }
    }

    /// Load the configured error catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<ErrorCatalog, ConfigError> {
        let catalog = match &self.error_catalog {
            Some(path) => ErrorCatalog::from_path(path)?,
            None => ErrorCatalog::builtin()?,
        };
        Ok(catalog)
    }

    /// Build the ledger, preloading the snapshot if one is configured.
    /// Returns the ledger and the number of preloaded records.
    pub fn build_ledger(&self) -> Result<(InMemoryLedger, usize), ConfigError> {
        let ledger = InMemoryLedger::new();
        let Some(path) = &self.state_snapshot else {
            return Ok((ledger, 0));
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::SnapshotIo {
            path: path.clone(),
            source,
        })?;
        let format_error = |reason: String| ConfigError::SnapshotFormat {
            path: path.clone(),
            reason,
        };

        let snapshot: Map<String, Value> =
            serde_json::from_str(&text).map_err(|e| format_error(e.to_string()))?;
        let loaded = ledger
            .load_snapshot(&snapshot)
            .map_err(|e| format_error(e.to_string()))?;
        Ok((ledger, loaded))
    }
}
