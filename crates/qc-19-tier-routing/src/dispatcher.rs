//! # Broadcast Dispatcher
//!
//! Routes a decoded gossip payload to the backend hosting its location.
//!
//! ## Admission table
//!
//! | Payload       | Forwarded when                         | On forward                    |
//! |---------------|----------------------------------------|-------------------------------|
//! | Block view    | always                                 | block ingress, peer lively    |
//! | Header view   | Zone backend that is not yet synced    | header ingress, peer lively   |
//! | Transactions  | backend is fully synchronized          | nothing counted               |
//! | Work share    | always                                 | work-share ingress, lively    |
//! | anything else | never                                  | peer banned                   |
//!
//! Blocks and headers the backend already stores also bump the matching
//! `known` counter. A work share the backend rejects as invalid bumps
//! `workShares/malicious`; it is still counted as ingress.
//!
//! Payloads that fail their admission condition are dropped silently and
//! still reported as accepted. Unrecognized payloads are rejected before the
//! location is resolved, so the ban applies whether or not it is hosted.

use std::sync::Arc;

use quantum_telemetry::{PropagationMetrics, WorkObjectCounter};
use shared_types::{hash_hex, Location, PeerId, Tier};
use tracing::{debug, error, trace, warn};

use crate::domain::{BackendError, Broadcast, GossipSlot, Pooled};
use crate::ports::PeerReputation;
use crate::registry::BackendRegistry;

/// Dispatcher service, generic over the reputation port.
///
/// Thread-safe; share it across workers via `Arc`.
pub struct BroadcastDispatcher<R: PeerReputation> {
    registry: Arc<BackendRegistry>,
    reputation: Arc<R>,
    metrics: PropagationMetrics,
}

impl<R: PeerReputation> BroadcastDispatcher<R> {
    pub fn new(
        registry: Arc<BackendRegistry>,
        reputation: Arc<R>,
        metrics: PropagationMetrics,
    ) -> Self {
        Self {
            registry,
            reputation,
            metrics,
        }
    }

    pub fn registry(&self) -> &Arc<BackendRegistry> {
        &self.registry
    }

    pub fn metrics(&self) -> &PropagationMetrics {
        &self.metrics
    }

    /// Handle one inbound broadcast. Takes ownership of the pooled payload,
    /// which goes back to the pool when this call returns.
    ///
    /// Returns whether the broadcast was accepted; the transport uses this
    /// as an extra scoring input.
    pub fn on_broadcast(
        &self,
        peer: &PeerId,
        topic: &str,
        slot: Pooled<GossipSlot>,
        location: &Location,
    ) -> bool {
        let accepted = self.dispatch(peer, topic, &slot, location);
        drop(slot);
        accepted
    }

    fn dispatch(&self, peer: &PeerId, topic: &str, slot: &GossipSlot, location: &Location) -> bool {
        let Some(broadcast) = Broadcast::classify(slot.payload()) else {
            error!(
                %peer,
                topic,
                %location,
                kind = ?slot.payload().map(|p| p.kind()),
                "[qc-19] Received unknown broadcast, banning peer"
            );
            self.reputation.ban_peer(peer);
            return false;
        };

        let backend = match self.registry.resolve(location) {
            Ok(backend) => backend,
            Err(e) => {
                error!(%peer, topic, broadcast = broadcast.name(), "[qc-19] {}", e);
                return false;
            }
        };

        match broadcast {
            Broadcast::Block(view) => {
                let block = view.work_object();
                trace!(hash = %hash_hex(&block.hash()), %location, "[qc-19] Writing block");
                if backend.block_by_hash(&block.hash()).is_some() {
                    self.metrics.inc(WorkObjectCounter::BlockKnown);
                }
                backend.write_block(block);
                self.metrics.inc(WorkObjectCounter::BlockIngress);
                self.reputation.mark_lively(peer, topic);
            }
            Broadcast::Header(view) => {
                // Header-only blocks are only useful to a zone still syncing.
                if backend.tier() == Tier::Zone && !backend.is_fully_synchronized() {
                    let block = view.work_object();
                    if backend.block_by_hash(&block.hash()).is_some() {
                        self.metrics.inc(WorkObjectCounter::HeaderKnown);
                    }
                    backend.write_block(block);
                    self.metrics.inc(WorkObjectCounter::HeaderIngress);
                    self.reputation.mark_lively(peer, topic);
                } else {
                    trace!(%location, "[qc-19] Dropping header view");
                }
            }
            Broadcast::Transactions(txs) => {
                if backend.is_fully_synchronized() {
                    if let Err(e) = backend.accept_remote_transactions(txs.as_slice()) {
                        debug!(%peer, count = txs.len(), "[qc-19] Transactions not accepted: {}", e);
                    }
                } else {
                    trace!(%location, count = txs.len(), "[qc-19] Dropping transactions while syncing");
                }
            }
            Broadcast::WorkShare(share) => {
                match backend.accept_work_share(share) {
                    Ok(()) => {}
                    Err(e @ BackendError::Rejected(_)) => {
                        warn!(%peer, "[qc-19] Invalid work share: {}", e);
                        self.metrics.inc(WorkObjectCounter::WorkShareMalicious);
                    }
                    Err(e) => debug!(%peer, "[qc-19] Work share not accepted: {}", e),
                }
                self.metrics.inc(WorkObjectCounter::WorkShareIngress);
                self.reputation.mark_lively(peer, topic);
            }
        }
        true
    }
}
