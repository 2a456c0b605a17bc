//! # Shared Types Crate
//!
//! Domain values shared by every crate of the node: the hierarchical
//! [`Location`] address model and the objects peers exchange about it.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-crate types are defined here.
//! - **Plain values**: everything is immutable data compared by value; no I/O.
//! - **No clamping**: out-of-range indices are representable. Code that maps a
//!   location onto fixed-size storage checks bounds itself.

pub mod entities;
pub mod errors;
pub mod location;

pub use entities::*;
pub use errors::*;
pub use location::*;
