//! Classification of inbound gossip payloads.

use qc_18_wire_codec::WireObject;
use shared_types::{Transactions, WorkObjectBlockView, WorkObjectHeader, WorkObjectHeaderView};

/// The broadcast kinds the dispatcher acts on. Everything else is a
/// protocol violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Broadcast<'a> {
    Block(&'a WorkObjectBlockView),
    Header(&'a WorkObjectHeaderView),
    Transactions(&'a Transactions),
    WorkShare(&'a WorkObjectHeader),
}

impl<'a> Broadcast<'a> {
    /// `None` for payloads that are not valid broadcasts (and empty slots).
    pub fn classify(payload: Option<&'a WireObject>) -> Option<Self> {
        match payload? {
            WireObject::BlockView(view) => Some(Broadcast::Block(view)),
            WireObject::HeaderView(view) => Some(Broadcast::Header(view)),
            WireObject::Transactions(txs) => Some(Broadcast::Transactions(txs)),
            WireObject::WorkShare(header) => Some(Broadcast::WorkShare(header)),
            WireObject::Hash(_) | WireObject::Transaction(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Broadcast::Block(_) => "block",
            Broadcast::Header(_) => "header",
            Broadcast::Transactions(_) => "transactions",
            Broadcast::WorkShare(_) => "workshare",
        }
    }
}
