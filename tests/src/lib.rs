//! # Tier Routing Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deterministic test-chain generator
//! ├── benchmarks/       # Criterion benchmarks per subsystem
//! │   ├── qc_18_wire_codec.rs
//! │   └── qc_19_tier_routing.rs
//! │
//! └── integration/      # Cross-crate flows and stress tests
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::
//! cargo test -p qc-tests integration::stress::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

pub mod fixtures;
pub mod integration;
