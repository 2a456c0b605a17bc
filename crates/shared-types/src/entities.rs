//! # Core Domain Entities
//!
//! The objects carried between peers and tier backends.
//!
//! ## Clusters
//!
//! - **Work objects**: [`WorkObject`], [`WorkObjectHeader`], [`WorkObjectBody`]
//!   and the two read-only projections [`WorkObjectBlockView`] /
//!   [`WorkObjectHeaderView`]
//! - **Transactions**: [`Transaction`], [`Transactions`]
//! - **Networking**: [`PeerId`]
//!
//! A [`WorkObjectHeader`] on its own doubles as a work share: a
//! sub-difficulty proof-of-work submission used for work-credit accounting.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::location::Location;

// Re-export U256 from primitive-types for difficulty and value fields
pub use primitive_types::U256;

/// A 32-byte Keccak-256 content identifier.
pub type Hash = [u8; 32];

/// A 20-byte account address.
pub type Address = [u8; 20];

/// Hash used for "no parent" / "no transactions".
pub const ZERO_HASH: Hash = [0u8; 32];

/// Lowercase hex rendering of a hash, for logs.
pub fn hash_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Identifier of a remote peer on the gossip substrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PeerId(pub [u8; 32]);

impl PeerId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

// =============================================================================
// WORK OBJECTS
// =============================================================================

/// Header of a work object.
///
/// Also gossiped standalone as a work share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkObjectHeader {
    /// Hash of the parent work object.
    pub parent_hash: Hash,
    /// Height of this object in its chain.
    pub number: u64,
    /// Proof-of-work difficulty target.
    pub difficulty: U256,
    /// Root over the body's transactions.
    pub tx_hash: Hash,
    /// Chain this object was produced for.
    pub location: Location,
    /// Unix timestamp (seconds).
    pub time: u64,
    /// Proof-of-work nonce.
    pub nonce: u64,
    /// Proof-of-work mix digest.
    pub mix_hash: Hash,
}

impl WorkObjectHeader {
    /// Keccak-256 over every header field.
    pub fn hash(&self) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(self.parent_hash);
        hasher.update(self.number.to_be_bytes());
        let mut difficulty = [0u8; 32];
        self.difficulty.to_big_endian(&mut difficulty);
        hasher.update(difficulty);
        hasher.update(self.tx_hash);
        hasher.update(self.location.to_bytes());
        hasher.update(self.time.to_be_bytes());
        hasher.update(self.nonce.to_be_bytes());
        hasher.update(self.mix_hash);
        hasher.finalize().into()
    }
}

/// Body of a work object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkObjectBody {
    /// Transactions included in this object.
    pub transactions: Vec<Transaction>,
    /// Headers of referenced uncle work objects.
    pub uncles: Vec<WorkObjectHeader>,
}

/// Unit of consensus progress at any tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkObject {
    pub header: WorkObjectHeader,
    pub body: WorkObjectBody,
}

impl WorkObject {
    pub fn new(header: WorkObjectHeader, body: WorkObjectBody) -> Self {
        Self { header, body }
    }

    /// Identity of a work object is the hash of its header.
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }

    pub fn parent_hash(&self) -> Hash {
        self.header.parent_hash
    }

    /// Self-declared chain of this object.
    pub fn location(&self) -> Location {
        self.header.location
    }

    /// Re-stamp the object with the chain it was received for.
    pub fn set_location(&mut self, location: Location) {
        self.header.location = location;
    }

    /// Full-object projection, used for propagating complete blocks.
    pub fn block_view(&self) -> WorkObjectBlockView {
        WorkObjectBlockView(self.clone())
    }

    /// Header-only projection. Transactions are dropped, uncles are kept.
    pub fn header_view(&self) -> WorkObjectHeaderView {
        WorkObjectHeaderView(WorkObject {
            header: self.header.clone(),
            body: WorkObjectBody {
                transactions: Vec::new(),
                uncles: self.body.uncles.clone(),
            },
        })
    }
}

/// A complete work object as propagated between peers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkObjectBlockView(pub WorkObject);

impl WorkObjectBlockView {
    pub fn work_object(&self) -> &WorkObject {
        &self.0
    }

    pub fn into_inner(self) -> WorkObject {
        self.0
    }
}

/// A transaction-free work object, used for fast propagation during sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkObjectHeaderView(pub WorkObject);

impl WorkObjectHeaderView {
    pub fn work_object(&self) -> &WorkObject {
        &self.0
    }

    pub fn into_inner(self) -> WorkObject {
        self.0
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// An executable transaction as received from the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Transaction {
    /// Chain id the transaction is bound to.
    pub chain_id: u64,
    /// Sender nonce.
    pub nonce: u64,
    /// Gas limit.
    pub gas: u64,
    /// Recipient; `None` for contract creation.
    pub to: Option<Address>,
    /// Transferred value in base units.
    pub value: U256,
    /// Call data.
    pub data: Vec<u8>,
    /// Sender signature over the other fields.
    pub signature: Vec<u8>,
}

impl Transaction {
    /// Keccak-256 over every field, signature included.
    pub fn hash(&self) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(self.chain_id.to_be_bytes());
        hasher.update(self.nonce.to_be_bytes());
        hasher.update(self.gas.to_be_bytes());
        if let Some(to) = &self.to {
            hasher.update(to);
        }
        let mut value = [0u8; 32];
        self.value.to_big_endian(&mut value);
        hasher.update(value);
        hasher.update(&self.data);
        hasher.update(&self.signature);
        hasher.finalize().into()
    }
}

/// Ordered batch of transactions, gossiped together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Transactions(pub Vec<Transaction>);

impl Transactions {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.0
    }

    /// Keccak-256 over the concatenated transaction hashes.
    pub fn root(&self) -> Hash {
        if self.0.is_empty() {
            return ZERO_HASH;
        }
        let mut hasher = Keccak256::new();
        for tx in &self.0 {
            hasher.update(tx.hash());
        }
        hasher.finalize().into()
    }
}

impl From<Vec<Transaction>> for Transactions {
    fn from(txs: Vec<Transaction>) -> Self {
        Self(txs)
    }
}
