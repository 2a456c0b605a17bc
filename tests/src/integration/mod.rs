//! # Integration Tests
//!
//! Cross-crate flows through a started node runtime.

pub mod gossip_flow;
pub mod stress;
