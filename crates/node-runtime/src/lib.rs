//! # Node Runtime Library
//!
//! Exposes the node's modules for integration tests. The entry point is
//! the `main.rs` binary.
//!
//! ## Layout
//!
//! - `adapters/` - in-memory implementations of the tier-routing ports
//! - `container/` - configuration and dependency injection
//! - `genesis/` - per-location genesis blocks
//! - `wiring/` - parent/child links between hosted tiers
//! - `runtime` - startup and shutdown

pub mod adapters;
pub mod container;
pub mod genesis;
pub mod runtime;
pub mod wiring;

pub use container::{NodeConfig, NodeContainer};
pub use runtime::NodeRuntime;
