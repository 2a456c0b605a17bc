//! # Node Runtime
//!
//! Startup and shutdown of the routing node.
//!
//! ## Startup Sequence
//!
//! 1. Build the container (backends registered per hosted location)
//! 2. Wire parent/child links between hosted tiers
//! 3. Write genesis to every hosted backend
//! 4. Broadcast the configured expansion number
//! 5. Signal ready

use std::sync::Arc;

use anyhow::{Context, Result};
use quantum_telemetry::encode_metrics;
use tokio::sync::watch;
use tracing::{error, info};

use crate::container::{NodeConfig, NodeContainer};
use crate::genesis::{GenesisBuilder, GenesisConfig};
use crate::wiring::wire_hierarchy;

/// The routing node with its shutdown signal.
pub struct NodeRuntime {
    container: Arc<NodeContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Result<Self> {
        info!("[node] Creating tier routing runtime");
        let container = Arc::new(NodeContainer::new(config)?);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Ok(Self {
            container,
            shutdown_tx,
            shutdown_rx,
        })
    }

    pub async fn start(&self) -> Result<()> {
        let routing = &self.container.config.routing;
        let registry = &self.container.registry;

        let links = wire_hierarchy(registry).context("failed to wire tier hierarchy")?;

        let genesis = GenesisBuilder::new(GenesisConfig {
            chain_id: routing.chain_id,
            ..Default::default()
        })
        .context("failed to create genesis builder")?;
        let genesis_hashes = genesis
            .initialize(registry)
            .context("failed to initialize genesis")?;

        registry.broadcast_expansion_number(routing.expansion_number);

        info!(
            hosted = registry.hosted_locations().len(),
            links,
            genesis = genesis_hashes.len(),
            expansion = routing.expansion_number,
            "[node] Tier routing ready"
        );
        Ok(())
    }

    pub async fn shutdown(&self) {
        info!("[node] Initiating shutdown");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("[node] Failed to send shutdown signal: {}", e);
        }
        match encode_metrics(&self.container.metrics_registry) {
            Ok(text) => info!(bytes = text.len(), "[node] Final metrics snapshot encoded"),
            Err(e) => error!("[node] Failed to encode metrics: {}", e),
        }
        info!("[node] Shutdown complete");
    }

    /// Receiver that flips to `true` once shutdown begins.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn container(&self) -> Arc<NodeContainer> {
        Arc::clone(&self.container)
    }
}
