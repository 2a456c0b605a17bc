//! Domain layer for Tier Routing.

pub mod broadcast;
pub mod errors;
pub mod pool;

pub use broadcast::Broadcast;
pub use errors::{BackendError, RoutingError};
pub use pool::{GossipPool, GossipSlot, ObjectPool, Pooled, Recycle};
