//! # Gossip Admission Filter
//!
//! Pre-delivery check run by the transport before a message reaches any
//! subscriber.
//!
//! Only full work objects are checked: their self-declared location must be
//! hosted here. Transactions are accepted and left to the backend mempool.
//! Every other kind is accepted as well, which is weaker than the
//! dispatcher's ban on unrecognized broadcasts. The two policies are kept
//! separate on purpose; see DESIGN.md before changing either.

use std::sync::Arc;

use qc_18_wire_codec::WireObject;
use shared_types::{hash_hex, PeerId};
use tracing::warn;

use crate::registry::BackendRegistry;

/// Outcome of the admission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Deliver to subscribers and relay.
    Accept,
    /// Drop without delivery.
    Reject,
}

pub struct GossipAdmissionFilter {
    registry: Arc<BackendRegistry>,
}

impl GossipAdmissionFilter {
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self { registry }
    }

    pub fn validate(&self, peer: &PeerId, payload: &WireObject) -> Admission {
        match payload {
            WireObject::BlockView(view) => {
                let wo = view.work_object();
                let location = wo.location();
                if self.registry.is_hosted(&location) {
                    Admission::Accept
                } else {
                    warn!(
                        %peer,
                        hash = %hash_hex(&wo.hash()),
                        %location,
                        "[qc-19] No backend found for this location"
                    );
                    Admission::Reject
                }
            }
            WireObject::Transaction(_) => Admission::Accept,
            WireObject::HeaderView(_)
            | WireObject::Hash(_)
            | WireObject::Transactions(_)
            | WireObject::WorkShare(_) => Admission::Accept,
        }
    }
}
