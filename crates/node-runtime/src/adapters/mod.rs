//! # Adapters
//!
//! Port implementations for the tier-routing outbound ports.

pub mod backend;
pub mod reputation;

pub use backend::InMemoryBackend;
pub use reputation::InMemoryReputation;
