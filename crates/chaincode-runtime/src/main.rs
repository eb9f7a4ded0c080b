//! # Chaincode Runtime Entry Point
//!
//! Reads one invocation vector per stdin line and prints one response per
//! stdout line until stdin closes.

use std::sync::Arc;

use anyhow::Result;
use chaincode_runtime::{init_logging, run_line, RuntimeConfig};
use record_chaincode::prelude::{Chaincode, RecordChaincode};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    init_logging(&config)?;

    info!(
        chaincode = %config.chaincode_name,
        version = record_chaincode::VERSION,
        "Starting chaincode runtime"
    );

    let chaincode = RecordChaincode::new(Arc::new(config.load_catalog()?));
    info!(entries = chaincode.catalog().len(), "Error catalog loaded");

    let (ledger, preloaded) = config.build_ledger()?;
    if preloaded > 0 {
        info!(records = preloaded, "State snapshot loaded");
    }

    let init = chaincode.init(&ledger.stub(Vec::new())).await;
    if !init.is_success() {
        anyhow::bail!("chaincode init failed: {:?}", init.message());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match run_line(&chaincode, &ledger, line).await {
            Ok(rendered) => {
                stdout.write_all(rendered.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            Err(e) => warn!(error = %e, "Skipping invocation line"),
        }
    }

    info!(records = ledger.len(), "Input closed, shutting down");
    Ok(())
}
