//! # Tier Routing Subsystem (qc-19)
//!
//! Routes inbound gossip and peer requests to the consensus backend hosting
//! the addressed chain (Prime, Region or Zone).
//!
//! ## Architecture
//!
//! ```text
//! transport ──bytes──▶ GossipPipeline
//!                        │ unmarshal_declared (qc-18)
//!                        ▼
//!                      GossipAdmissionFilter ──reject──▶ dropped
//!                        │ restamp with topic location into a pooled GossipSlot
//!                        ▼
//!                      BroadcastDispatcher ──▶ BackendRegistry::resolve ──▶ ConsensusBackend
//!                        │
//!                        └──▶ PeerReputation (lively / ban), PropagationMetrics
//! ```
//!
//! Outbound ports ([`ConsensusBackend`], [`PeerReputation`]) are implemented
//! by adapters in node-runtime.
//!
//! ## Invariants
//!
//! - `resolve` never panics; an absent backend is [`RoutingError::Unhosted`].
//! - Unrecognized broadcasts always ban the source peer exactly once.
//! - Every pooled payload is released exactly once.

pub mod admission;
pub mod dispatcher;
pub mod domain;
pub mod pipeline;
pub mod ports;
pub mod registry;
pub mod server;


pub use admission::{Admission, GossipAdmissionFilter};
pub use dispatcher::BroadcastDispatcher;
pub use domain::{
    BackendError, Broadcast, GossipPool, GossipSlot, ObjectPool, Pooled, Recycle, RoutingError,
};
pub use pipeline::GossipPipeline;
pub use ports::{ConsensusBackend, PeerReputation};
pub use registry::BackendRegistry;
pub use server::RequestServer;
