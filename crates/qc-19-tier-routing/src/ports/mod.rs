//! Ports (hexagonal boundaries) for Tier Routing.

pub mod outbound;

pub use outbound::{ConsensusBackend, PeerReputation};
