//! # Peer Reputation Adapter
//!
//! Implements the [`PeerReputation`] port. Keeps a per-peer lively count and
//! a ban list that the transport consults before accepting new streams.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use qc_19_tier_routing::PeerReputation;
use shared_types::PeerId;
use tracing::{trace, warn};

#[derive(Default)]
pub struct InMemoryReputation {
    lively: RwLock<HashMap<PeerId, u64>>,
    banned: RwLock<HashSet<PeerId>>,
}

impl InMemoryReputation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_banned(&self, peer: &PeerId) -> bool {
        self.banned.read().contains(peer)
    }

    pub fn lively_count(&self, peer: &PeerId) -> u64 {
        self.lively.read().get(peer).copied().unwrap_or(0)
    }

    pub fn banned_count(&self) -> usize {
        self.banned.read().len()
    }
}

impl PeerReputation for InMemoryReputation {
    fn mark_lively(&self, peer: &PeerId, topic: &str) {
        *self.lively.write().entry(*peer).or_insert(0) += 1;
        trace!(%peer, topic, "[node] Peer marked lively");
    }

    fn ban_peer(&self, peer: &PeerId) {
        if self.banned.write().insert(*peer) {
            warn!(%peer, "[node] Peer banned");
        }
    }
}
