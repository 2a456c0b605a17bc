//! # Quantum Telemetry
//!
//! Logging and metrics for the node.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with env-driven filtering and optional
//!   JSON output for log shippers
//! - **Metrics**: Prometheus counter sets built against an injected
//!   [`prometheus::Registry`], never ambient globals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{init_logging, PropagationMetrics, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//!
//! let registry = prometheus::Registry::new();
//! let metrics = PropagationMetrics::new(&registry)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `quantum-chain` | Service name in logs |
//! | `QC_LOG_LEVEL` | `info` | Log level filter |
//! | `QC_JSON_LOGS` | `false` | JSON formatted logs |
//! | `QC_CONSOLE_OUTPUT` | `true` | ANSI colors on console output |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};
pub use metrics::{
    encode_metrics, PropagationMetrics, TxDirection, WireMetrics, WorkObjectCounter,
};
pub use prometheus::Registry;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
