//! Outbound ports (SPI) for Tier Routing.
//!
//! Implemented by adapters in node-runtime (and by mocks in tests).

use std::sync::Arc;

use shared_types::{Hash, Location, PeerId, Tier, Transaction, WorkObject, WorkObjectHeader};

use crate::domain::BackendError;

/// A locally running consensus engine for one location.
///
/// Calls are synchronous from the router's point of view. Implementations
/// must tolerate `set_expansion_number` racing with the other methods.
pub trait ConsensusBackend: Send + Sync {
    /// Location this backend serves.
    fn location(&self) -> Location;

    fn tier(&self) -> Tier {
        self.location().tier()
    }

    /// True once the backend has caught up and accepts live traffic.
    fn is_fully_synchronized(&self) -> bool;

    /// Append a block (or a provisional header-only block during sync).
    fn write_block(&self, block: &WorkObject);

    /// Hand remote transactions to the mempool.
    fn accept_remote_transactions(&self, txs: &[Transaction]) -> Result<(), BackendError>;

    /// Hand a sub-difficulty work share to work-credit accounting.
    fn accept_work_share(&self, share: &WorkObjectHeader) -> Result<(), BackendError>;

    /// Topology epoch: number of currently active regions/zones.
    fn set_expansion_number(&self, expansion_number: u8);

    fn write_genesis_block(&self, block: &WorkObject, location: &Location);

    /// Attach the backend of a subordinate chain.
    fn set_child_backend(&self, child: Arc<dyn ConsensusBackend>, child_location: Location);

    /// Attach the backend of the dominant chain.
    fn set_parent_backend(&self, parent: Arc<dyn ConsensusBackend>);

    /// Seed cross-tier data pending from genesis.
    fn add_genesis_pending_cross_tier(&self, block: &WorkObject);

    fn block_by_hash(&self, hash: &Hash) -> Option<WorkObject>;

    /// Canonical hash at `number`.
    fn block_hash_by_number(&self, number: u64) -> Option<Hash>;
}

/// Reputation feedback to the transport layer.
pub trait PeerReputation: Send + Sync {
    /// The peer delivered a useful broadcast on `topic`.
    fn mark_lively(&self, peer: &PeerId, topic: &str);

    /// The peer violated the protocol.
    fn ban_peer(&self, peer: &PeerId);
}
