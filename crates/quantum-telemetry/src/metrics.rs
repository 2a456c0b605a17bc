//! Prometheus metrics for the routing and wire layers.
//!
//! All metrics follow the naming convention: `qc_<area>_<metric>_total`
//!
//! Metric sets are plain structs registered against a caller-supplied
//! [`Registry`], so every test (and every node instance) gets fresh counters.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

/// Work-object propagation counters, one label value per (kind, outcome).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkObjectCounter {
    BlockIngress,
    BlockKnown,
    BlockMalicious,
    HeaderIngress,
    HeaderKnown,
    HeaderMalicious,
    WorkShareIngress,
    WorkShareKnown,
    WorkShareMalicious,
}

impl WorkObjectCounter {
    pub const ALL: [WorkObjectCounter; 9] = [
        WorkObjectCounter::BlockIngress,
        WorkObjectCounter::BlockKnown,
        WorkObjectCounter::BlockMalicious,
        WorkObjectCounter::HeaderIngress,
        WorkObjectCounter::HeaderKnown,
        WorkObjectCounter::HeaderMalicious,
        WorkObjectCounter::WorkShareIngress,
        WorkObjectCounter::WorkShareKnown,
        WorkObjectCounter::WorkShareMalicious,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WorkObjectCounter::BlockIngress => "blocks/ingress",
            WorkObjectCounter::BlockKnown => "blocks/known",
            WorkObjectCounter::BlockMalicious => "blocks/malicious",
            WorkObjectCounter::HeaderIngress => "headers/ingress",
            WorkObjectCounter::HeaderKnown => "headers/known",
            WorkObjectCounter::HeaderMalicious => "headers/malicious",
            WorkObjectCounter::WorkShareIngress => "workShares/ingress",
            WorkObjectCounter::WorkShareKnown => "workShares/known",
            WorkObjectCounter::WorkShareMalicious => "workShares/malicious",
        }
    }
}

/// Direction of transaction propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxDirection {
    Ingress,
    Egress,
}

impl TxDirection {
    pub fn label(&self) -> &'static str {
        match self {
            TxDirection::Ingress => "ingress",
            TxDirection::Egress => "egress",
        }
    }
}

/// Counters updated by the broadcast dispatcher.
#[derive(Clone)]
pub struct PropagationMetrics {
    work_objects: IntCounterVec,
    transactions: IntCounterVec,
}

impl PropagationMetrics {
    /// Create the counters and register them with `registry`.
    pub fn new(registry: &Registry) -> Result<Self, TelemetryError> {
        let work_objects = IntCounterVec::new(
            Opts::new("qc_work_object_total", "Work object propagation by kind and outcome"),
            &["kind"], // e.g. blocks/ingress, headers/known, workShares/malicious
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        let transactions = IntCounterVec::new(
            Opts::new("qc_tx_propagation_total", "Transaction propagation counter"),
            &["direction"], // ingress/egress
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        registry
            .register(Box::new(work_objects.clone()))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        registry
            .register(Box::new(transactions.clone()))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        Ok(Self {
            work_objects,
            transactions,
        })
    }

    pub fn inc(&self, counter: WorkObjectCounter) {
        self.work_objects
            .with_label_values(&[counter.label()])
            .inc();
    }

    pub fn get(&self, counter: WorkObjectCounter) -> u64 {
        self.work_objects
            .with_label_values(&[counter.label()])
            .get()
    }

    pub fn add_transactions(&self, direction: TxDirection, count: u64) {
        self.transactions
            .with_label_values(&[direction.label()])
            .inc_by(count);
    }

    pub fn transactions(&self, direction: TxDirection) -> u64 {
        self.transactions
            .with_label_values(&[direction.label()])
            .get()
    }

    /// Sum over every work-object counter.
    pub fn total_work_objects(&self) -> u64 {
        WorkObjectCounter::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Counters updated by the wire codec on successful response decodes.
#[derive(Clone)]
pub struct WireMetrics {
    decoded: IntCounterVec,
}

impl WireMetrics {
    pub fn new(registry: &Registry) -> Result<Self, TelemetryError> {
        let decoded = IntCounterVec::new(
            Opts::new("qc_wire_decoded_total", "Successfully decoded responses by shape"),
            &["shape"], // blocks/headers/hashes
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        registry
            .register(Box::new(decoded.clone()))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        Ok(Self { decoded })
    }

    pub fn inc_decoded(&self, shape: &str) {
        self.decoded.with_label_values(&[shape]).inc();
    }

    pub fn decoded(&self, shape: &str) -> u64 {
        self.decoded.with_label_values(&[shape]).get()
    }
}

/// Encode all metrics in `registry` as Prometheus text format.
pub fn encode_metrics(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
