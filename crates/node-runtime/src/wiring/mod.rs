//! # Wiring
//!
//! Connects hosted backends to each other after registration.

pub mod hierarchy;

pub use hierarchy::wire_hierarchy;
