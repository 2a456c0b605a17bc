//! Domain <-> protobuf conversions.
//!
//! Encoding is infallible. Decoding validates every fixed-width field and
//! re-stamps decoded work objects with the location they were received for.

use shared_types::{
    Address, Hash, Location, Transaction, Transactions, WorkObject, WorkObjectBody,
    WorkObjectHeader, U256,
};

use crate::errors::WireError;
use crate::proto::{
    ProtoHash, ProtoLocation, ProtoTransaction, ProtoTransactions, ProtoWorkObject,
    ProtoWorkObjectBody, ProtoWorkObjectHeader,
};

// =============================================================================
// PRIMITIVES
// =============================================================================

pub(crate) fn hash_to_proto(hash: &Hash) -> ProtoHash {
    ProtoHash {
        value: hash.to_vec(),
    }
}

pub(crate) fn hash_from_proto(proto: &ProtoHash) -> Result<Hash, WireError> {
    proto
        .value
        .as_slice()
        .try_into()
        .map_err(|_| WireError::InvalidHashLength(proto.value.len()))
}

fn required_hash(proto: &Option<ProtoHash>, field: &'static str) -> Result<Hash, WireError> {
    proto
        .as_ref()
        .ok_or(WireError::MissingField(field))
        .and_then(hash_from_proto)
}

pub(crate) fn location_to_proto(location: &Location) -> ProtoLocation {
    ProtoLocation {
        value: location.to_bytes(),
    }
}

/// An absent location field decodes as Prime, the same as an empty one.
pub(crate) fn location_from_proto(proto: &Option<ProtoLocation>) -> Result<Location, WireError> {
    match proto {
        Some(loc) => Ok(Location::from_bytes(&loc.value)?),
        None => Ok(Location::Prime),
    }
}

/// Minimal big-endian form (no leading zero bytes; zero is empty).
pub(crate) fn u64_to_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

pub(crate) fn u64_from_bytes(bytes: &[u8], field: &'static str) -> Result<u64, WireError> {
    if bytes.len() > 8 {
        return Err(WireError::NumberTooWide {
            field,
            len: bytes.len(),
            max: 8,
        });
    }
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

fn u256_to_bytes(value: &U256) -> Vec<u8> {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let first = buf.iter().position(|b| *b != 0).unwrap_or(buf.len());
    buf[first..].to_vec()
}

fn u256_from_bytes(bytes: &[u8], field: &'static str) -> Result<U256, WireError> {
    // from_big_endian asserts on inputs wider than 32 bytes.
    if bytes.len() > 32 {
        return Err(WireError::NumberTooWide {
            field,
            len: bytes.len(),
            max: 32,
        });
    }
    Ok(U256::from_big_endian(bytes))
}

fn address_from_bytes(bytes: &[u8]) -> Result<Option<Address>, WireError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let address: Address = bytes
        .try_into()
        .map_err(|_| WireError::InvalidAddressLength(bytes.len()))?;
    Ok(Some(address))
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

pub(crate) fn transaction_to_proto(tx: &Transaction) -> ProtoTransaction {
    ProtoTransaction {
        chain_id: tx.chain_id,
        nonce: tx.nonce,
        gas: tx.gas,
        to: tx.to.map(|a| a.to_vec()).unwrap_or_default(),
        value: u256_to_bytes(&tx.value),
        data: tx.data.clone(),
        signature: tx.signature.clone(),
    }
}

pub(crate) fn transaction_from_proto(proto: &ProtoTransaction) -> Result<Transaction, WireError> {
    Ok(Transaction {
        chain_id: proto.chain_id,
        nonce: proto.nonce,
        gas: proto.gas,
        to: address_from_bytes(&proto.to)?,
        value: u256_from_bytes(&proto.value, "value")?,
        data: proto.data.clone(),
        signature: proto.signature.clone(),
    })
}

pub(crate) fn transactions_to_proto(txs: &Transactions) -> ProtoTransactions {
    ProtoTransactions {
        transactions: txs.as_slice().iter().map(transaction_to_proto).collect(),
    }
}

pub(crate) fn transactions_from_proto(
    proto: &ProtoTransactions,
) -> Result<Transactions, WireError> {
    proto
        .transactions
        .iter()
        .map(transaction_from_proto)
        .collect::<Result<Vec<_>, _>>()
        .map(Transactions)
}

// =============================================================================
// WORK OBJECTS
// =============================================================================

pub(crate) fn header_to_proto(header: &WorkObjectHeader) -> ProtoWorkObjectHeader {
    ProtoWorkObjectHeader {
        parent_hash: Some(hash_to_proto(&header.parent_hash)),
        number: header.number,
        difficulty: u256_to_bytes(&header.difficulty),
        tx_hash: Some(hash_to_proto(&header.tx_hash)),
        location: Some(location_to_proto(&header.location)),
        time: header.time,
        nonce: header.nonce,
        mix_hash: Some(hash_to_proto(&header.mix_hash)),
    }
}

/// Decode a header, keeping the location it declares on the wire.
pub(crate) fn header_from_proto(
    proto: &ProtoWorkObjectHeader,
) -> Result<WorkObjectHeader, WireError> {
    Ok(WorkObjectHeader {
        parent_hash: required_hash(&proto.parent_hash, "parent_hash")?,
        number: proto.number,
        difficulty: u256_from_bytes(&proto.difficulty, "difficulty")?,
        tx_hash: required_hash(&proto.tx_hash, "tx_hash")?,
        location: location_from_proto(&proto.location)?,
        time: proto.time,
        nonce: proto.nonce,
        mix_hash: required_hash(&proto.mix_hash, "mix_hash")?,
    })
}

/// Encode a work object. With `include_transactions == false` the body
/// carries uncles only (header-view form).
pub(crate) fn work_object_to_proto(wo: &WorkObject, include_transactions: bool) -> ProtoWorkObject {
    let transactions = if include_transactions {
        wo.body.transactions.iter().map(transaction_to_proto).collect()
    } else {
        Vec::new()
    };

    ProtoWorkObject {
        wo_header: Some(header_to_proto(&wo.header)),
        wo_body: Some(ProtoWorkObjectBody {
            transactions,
            uncles: wo.body.uncles.iter().map(header_to_proto).collect(),
        }),
    }
}

/// Decode a work object and stamp it with `source`, the location it was
/// received for. An absent body decodes as empty.
pub(crate) fn work_object_from_proto(
    proto: &ProtoWorkObject,
    source: &Location,
) -> Result<WorkObject, WireError> {
    let mut wo = work_object_declared(proto)?;
    wo.set_location(*source);
    Ok(wo)
}

/// Decode a work object keeping the location its header declares.
pub(crate) fn work_object_declared(proto: &ProtoWorkObject) -> Result<WorkObject, WireError> {
    let header = proto
        .wo_header
        .as_ref()
        .ok_or(WireError::MissingField("wo_header"))?;

    let mut wo = WorkObject::new(header_from_proto(header)?, WorkObjectBody::default());
    if let Some(body) = &proto.wo_body {
        wo.body.transactions = body
            .transactions
            .iter()
            .map(transaction_from_proto)
            .collect::<Result<_, _>>()?;
        wo.body.uncles = body
            .uncles
            .iter()
            .map(header_from_proto)
            .collect::<Result<_, _>>()?;
    }
    Ok(wo)
}
