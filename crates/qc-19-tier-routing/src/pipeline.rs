//! # Gossip Pipeline
//!
//! Inbound gossip path: topic parse → pooled decode → admission filter →
//! re-stamp with the topic location → dispatcher. The filter judges the
//! location a view declares for itself, not the topic it arrived on.
//! Decode failures ban nobody; the transport scores undecodable data on
//! its own.

use std::sync::Arc;

use qc_18_wire_codec::{unmarshal_declared, Topic};
use shared_types::PeerId;
use tracing::{debug, warn};

use crate::admission::{Admission, GossipAdmissionFilter};
use crate::dispatcher::BroadcastDispatcher;
use crate::domain::GossipPool;
use crate::ports::PeerReputation;

pub struct GossipPipeline<R: PeerReputation> {
    pool: GossipPool,
    filter: GossipAdmissionFilter,
    dispatcher: Arc<BroadcastDispatcher<R>>,
}

impl<R: PeerReputation> GossipPipeline<R> {
    pub fn new(dispatcher: Arc<BroadcastDispatcher<R>>, pool: GossipPool) -> Self {
        Self {
            filter: GossipAdmissionFilter::new(Arc::clone(dispatcher.registry())),
            pool,
            dispatcher,
        }
    }

    pub fn pool(&self) -> &GossipPool {
        &self.pool
    }

    pub fn dispatcher(&self) -> &Arc<BroadcastDispatcher<R>> {
        &self.dispatcher
    }

    /// Handle raw gossip bytes received on `topic`. Returns whether the
    /// message was accepted.
    pub fn handle(&self, peer: &PeerId, topic: &str, bytes: &[u8]) -> bool {
        let parsed: Topic = match topic.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(%peer, topic, "[qc-19] Unparseable topic: {}", e);
                return false;
            }
        };

        let mut slot = self.pool.acquire();
        let mut payload = match unmarshal_declared(bytes, parsed.kind) {
            Ok(payload) => payload,
            Err(e) => {
                debug!(%peer, topic, len = bytes.len(), "[qc-19] Failed to decode gossip: {}", e);
                return false;
            }
        };

        if self.filter.validate(peer, &payload) == Admission::Reject {
            return false;
        }

        payload.restamp(&parsed.location);
        slot.set(payload);
        self.dispatcher
            .on_broadcast(peer, topic, slot, &parsed.location)
    }
}
