//! # Node Container
//!
//! Holds every routing component with its dependencies injected:
//!
//! - one [`InMemoryBackend`] per hosted location, registered in the
//!   [`BackendRegistry`]
//! - the Prometheus registry and the metric sets built against it
//! - dispatcher, gossip pipeline, request server and response codec

pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use qc_18_wire_codec::WireCodec;
use qc_19_tier_routing::{
    BackendRegistry, BroadcastDispatcher, ConsensusBackend, GossipPipeline, GossipPool,
    RequestServer,
};
use quantum_telemetry::{PropagationMetrics, Registry, WireMetrics};
use shared_types::Location;

use crate::adapters::{InMemoryBackend, InMemoryReputation};

pub use config::{ConfigError, NodeConfig, RoutingConfig};

/// Dispatcher type used by the node.
pub type NodeDispatcher = BroadcastDispatcher<InMemoryReputation>;

pub struct NodeContainer {
    pub config: NodeConfig,
    pub metrics_registry: Registry,
    pub registry: Arc<BackendRegistry>,
    pub backends: Vec<Arc<InMemoryBackend>>,
    pub reputation: Arc<InMemoryReputation>,
    pub dispatcher: Arc<NodeDispatcher>,
    pub pipeline: GossipPipeline<InMemoryReputation>,
    pub server: RequestServer,
    /// Decoder for responses to our own requests; counts successes.
    pub codec: WireCodec,
}

impl NodeContainer {
    pub fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("invalid node configuration")?;

        let metrics_registry = Registry::new();
        let propagation = PropagationMetrics::new(&metrics_registry)
            .context("failed to register propagation metrics")?;
        let wire = WireMetrics::new(&metrics_registry)
            .context("failed to register wire metrics")?;

        let registry = Arc::new(BackendRegistry::new());
        let mut backends = Vec::with_capacity(config.routing.hosted_locations.len());
        for location in &config.routing.hosted_locations {
            let backend = Arc::new(InMemoryBackend::new(*location));
            registry
                .register(*location, backend.clone())
                .with_context(|| format!("failed to register backend for {}", location))?;
            backends.push(backend);
        }

        let reputation = Arc::new(InMemoryReputation::new());
        let dispatcher = Arc::new(BroadcastDispatcher::new(
            Arc::clone(&registry),
            Arc::clone(&reputation),
            propagation,
        ));
        let pipeline = GossipPipeline::new(
            Arc::clone(&dispatcher),
            GossipPool::new(config.routing.pool_capacity),
        );
        let server = RequestServer::new(Arc::clone(&registry));

        Ok(Self {
            config,
            metrics_registry,
            registry,
            backends,
            reputation,
            dispatcher,
            pipeline,
            server,
            codec: WireCodec::with_metrics(wire),
        })
    }

    /// Backend hosted for `location`, if any.
    pub fn backend(&self, location: &Location) -> Option<&Arc<InMemoryBackend>> {
        self.backends.iter().find(|b| b.location() == *location)
    }
}
