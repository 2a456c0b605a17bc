//! # Tier Routing Node
//!
//! Hosts consensus backends for a subset of the Prime/Region/Zone hierarchy
//! and routes gossip and peer requests to them.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging
//! 3. Build and start the runtime
//! 4. Run until Ctrl+C

use anyhow::{Context, Result};
use tracing::info;

use node_runtime::{NodeConfig, NodeRuntime};
use quantum_telemetry::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("failed to load configuration")?;
    init_logging(&config.telemetry).context("failed to initialize logging")?;

    info!(
        hosted = ?config.routing.hosted_locations,
        "[node] Loaded configuration"
    );

    let runtime = NodeRuntime::new(config)?;
    runtime.start().await?;

    info!("[node] Running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}
