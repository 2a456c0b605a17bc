//! # Generic Marshal / Unmarshal
//!
//! Serializes the closed set of gossip payload kinds directly, without the
//! request/response wrapper. Both directions are exhaustive matches over
//! [`WireKind`] / [`WireObject`], so a new kind cannot be added on one side
//! only.

use std::fmt;
use std::str::FromStr;

use prost::Message;
use shared_types::{
    Hash, Location, Transaction, Transactions, WorkObjectBlockView, WorkObjectHeader,
    WorkObjectHeaderView,
};

use crate::convert::{
    hash_from_proto, hash_to_proto, header_from_proto, header_to_proto, transaction_from_proto,
    transaction_to_proto, transactions_from_proto, transactions_to_proto, work_object_declared,
    work_object_to_proto,
};
use crate::errors::WireError;
use crate::proto::{
    ProtoHash, ProtoTransaction, ProtoTransactions, ProtoWorkObjectBlockView,
    ProtoWorkObjectHeader, ProtoWorkObjectHeaderView,
};

/// Payload kinds carried on gossip topics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WireKind {
    HeaderView,
    BlockView,
    Hash,
    Transaction,
    Transactions,
    WorkShare,
}

impl WireKind {
    pub const ALL: [WireKind; 6] = [
        WireKind::HeaderView,
        WireKind::BlockView,
        WireKind::Hash,
        WireKind::Transaction,
        WireKind::Transactions,
        WireKind::WorkShare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WireKind::HeaderView => "headers",
            WireKind::BlockView => "blocks",
            WireKind::Hash => "hash",
            WireKind::Transaction => "transaction",
            WireKind::Transactions => "transactions",
            WireKind::WorkShare => "workshare",
        }
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireKind {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WireKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| WireError::UnsupportedType(s.to_string()))
    }
}

/// A decoded gossip payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WireObject {
    HeaderView(WorkObjectHeaderView),
    BlockView(WorkObjectBlockView),
    Hash(Hash),
    Transaction(Transaction),
    Transactions(Transactions),
    WorkShare(WorkObjectHeader),
}

impl WireObject {
    /// Stamp work-object views with `source`. Other kinds carry no
    /// location of their own and are left unchanged.
    pub fn restamp(&mut self, source: &Location) {
        match self {
            WireObject::HeaderView(view) => view.0.set_location(*source),
            WireObject::BlockView(view) => view.0.set_location(*source),
            WireObject::Hash(_)
            | WireObject::Transaction(_)
            | WireObject::Transactions(_)
            | WireObject::WorkShare(_) => {}
        }
    }

    pub fn kind(&self) -> WireKind {
        match self {
            WireObject::HeaderView(_) => WireKind::HeaderView,
            WireObject::BlockView(_) => WireKind::BlockView,
            WireObject::Hash(_) => WireKind::Hash,
            WireObject::Transaction(_) => WireKind::Transaction,
            WireObject::Transactions(_) => WireKind::Transactions,
            WireObject::WorkShare(_) => WireKind::WorkShare,
        }
    }
}

/// Serialize a payload with its own schema.
pub fn marshal(object: &WireObject) -> Vec<u8> {
    match object {
        WireObject::HeaderView(view) => ProtoWorkObjectHeaderView {
            work_object: Some(work_object_to_proto(view.work_object(), false)),
        }
        .encode_to_vec(),
        WireObject::BlockView(view) => ProtoWorkObjectBlockView {
            work_object: Some(work_object_to_proto(view.work_object(), true)),
        }
        .encode_to_vec(),
        WireObject::Hash(hash) => hash_to_proto(hash).encode_to_vec(),
        WireObject::Transaction(tx) => transaction_to_proto(tx).encode_to_vec(),
        WireObject::Transactions(txs) => transactions_to_proto(txs).encode_to_vec(),
        WireObject::WorkShare(header) => header_to_proto(header).encode_to_vec(),
    }
}

/// Deserialize a payload of `kind`. Work-object views are re-stamped with
/// `source`, the location of the topic they arrived on.
pub fn unmarshal(bytes: &[u8], kind: WireKind, source: &Location) -> Result<WireObject, WireError> {
    let mut object = unmarshal_declared(bytes, kind)?;
    object.restamp(source);
    Ok(object)
}

/// Deserialize a payload of `kind`, keeping the location each work-object
/// view declares for itself.
pub fn unmarshal_declared(bytes: &[u8], kind: WireKind) -> Result<WireObject, WireError> {
    match kind {
        WireKind::HeaderView => {
            let proto = ProtoWorkObjectHeaderView::decode(bytes)?;
            let wo = proto
                .work_object
                .as_ref()
                .ok_or(WireError::MissingField("work_object"))?;
            let mut decoded = work_object_declared(wo)?;
            decoded.body.transactions.clear();
            Ok(WireObject::HeaderView(WorkObjectHeaderView(decoded)))
        }
        WireKind::BlockView => {
            let proto = ProtoWorkObjectBlockView::decode(bytes)?;
            let wo = proto
                .work_object
                .as_ref()
                .ok_or(WireError::MissingField("work_object"))?;
            Ok(WireObject::BlockView(WorkObjectBlockView(
                work_object_declared(wo)?,
            )))
        }
        WireKind::Hash => Ok(WireObject::Hash(hash_from_proto(&ProtoHash::decode(bytes)?)?)),
        WireKind::Transaction => Ok(WireObject::Transaction(transaction_from_proto(
            &ProtoTransaction::decode(bytes)?,
        )?)),
        WireKind::Transactions => Ok(WireObject::Transactions(transactions_from_proto(
            &ProtoTransactions::decode(bytes)?,
        )?)),
        WireKind::WorkShare => Ok(WireObject::WorkShare(header_from_proto(
            &ProtoWorkObjectHeader::decode(bytes)?,
        )?)),
    }
}
