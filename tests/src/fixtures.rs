//! # Test Fixtures
//!
//! Deterministic work-object chains for integration tests and benchmarks.
//!
//! ```rust,ignore
//! let genesis = fixtures::genesis(Location::zone(0, 0));
//! let chain = fixtures::generate_chain(&genesis, 5, |i, gen| {
//!     if i == 2 {
//!         gen.add_transaction(fixtures::transaction(7));
//!     }
//! });
//! ```

use sha3::{Digest, Keccak256};
use shared_types::{
    Hash, Location, PeerId, Transaction, Transactions, WorkObject, WorkObjectBody,
    WorkObjectHeader, U256, ZERO_HASH,
};

/// Seconds between generated blocks unless a generator offsets it.
pub const BLOCK_INTERVAL: u64 = 10;

/// Timestamp of [`genesis`].
pub const GENESIS_TIME: u64 = 1_700_000_000;

/// Per-block builder handed to the `generate_chain` callback.
pub struct BlockGen {
    header: WorkObjectHeader,
    body: WorkObjectBody,
}

impl BlockGen {
    /// Height of the block being generated.
    pub fn number(&self) -> u64 {
        self.header.number
    }

    pub fn location(&self) -> Location {
        self.header.location
    }

    pub fn add_transaction(&mut self, tx: Transaction) {
        self.body.transactions.push(tx);
    }

    pub fn set_nonce(&mut self, nonce: u64) {
        self.header.nonce = nonce;
    }

    /// Shift the timestamp relative to the default interval.
    pub fn offset_time(&mut self, seconds: i64) {
        self.header.time = self.header.time.saturating_add_signed(seconds);
    }

    pub fn set_difficulty(&mut self, difficulty: U256) {
        self.header.difficulty = difficulty;
    }

    pub fn add_uncle(&mut self, uncle: WorkObjectHeader) {
        self.body.uncles.push(uncle);
    }

    fn finish(mut self) -> WorkObject {
        self.header.tx_hash = Transactions(self.body.transactions.clone()).root();
        WorkObject::new(self.header, self.body)
    }
}

/// Height-0 block for `location` with a fixed timestamp.
pub fn genesis(location: Location) -> WorkObject {
    WorkObject::new(
        WorkObjectHeader {
            parent_hash: ZERO_HASH,
            number: 0,
            difficulty: U256::from(1_000_000u64),
            tx_hash: ZERO_HASH,
            location,
            time: GENESIS_TIME,
            nonce: 0,
            mix_hash: ZERO_HASH,
        },
        WorkObjectBody::default(),
    )
}

/// Create `n` blocks linked after `parent`, at the parent's location.
///
/// `gen` is called with the zero-based index of each new block before it
/// is sealed; the transaction root is computed afterwards.
pub fn generate_chain<F>(parent: &WorkObject, n: usize, mut gen: F) -> Vec<WorkObject>
where
    F: FnMut(usize, &mut BlockGen),
{
    let mut blocks: Vec<WorkObject> = Vec::with_capacity(n);

    for i in 0..n {
        let prev = blocks.last().unwrap_or(parent);
        let number = prev.number() + 1;
        let parent_hash = prev.hash();

        let mut block = BlockGen {
            header: WorkObjectHeader {
                parent_hash,
                number,
                difficulty: prev.header.difficulty,
                tx_hash: ZERO_HASH,
                location: prev.location(),
                time: prev.header.time + BLOCK_INTERVAL,
                nonce: 0,
                mix_hash: mix_seed(&parent_hash, number),
            },
            body: WorkObjectBody::default(),
        };
        gen(i, &mut block);
        blocks.push(block.finish());
    }
    blocks
}

/// Deterministic transaction distinguished by `nonce`.
pub fn transaction(nonce: u64) -> Transaction {
    Transaction {
        chain_id: 9000,
        nonce,
        gas: 21_000,
        to: Some([0xBB; 20]),
        value: U256::from(1_000u64 + nonce),
        data: Vec::new(),
        signature: vec![0xAA; 65],
    }
}

/// Work share (bare header) for `location`.
pub fn work_share(location: Location, nonce: u64) -> WorkObjectHeader {
    WorkObjectHeader {
        location,
        nonce,
        number: 1,
        difficulty: U256::from(500u64),
        ..Default::default()
    }
}

pub fn peer(byte: u8) -> PeerId {
    PeerId::new([byte; 32])
}

fn mix_seed(parent_hash: &Hash, number: u64) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(parent_hash);
    hasher.update(number.to_be_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_is_linked_and_deterministic() {
        let g = genesis(Location::zone(1, 1));
        let a = generate_chain(&g, 4, |_, _| {});
        let b = generate_chain(&g, 4, |_, _| {});

        assert_eq!(a, b);
        assert_eq!(a[0].parent_hash(), g.hash());
        for pair in a.windows(2) {
            assert_eq!(pair[1].parent_hash(), pair[0].hash());
            assert_eq!(pair[1].number(), pair[0].number() + 1);
        }
        assert!(a.iter().all(|wo| wo.location() == Location::zone(1, 1)));
    }

    #[test]
    fn test_generator_callbacks_apply() {
        let g = genesis(Location::prime());
        let uncle = g.header.clone();
        let chain = generate_chain(&g, 3, |i, gen| {
            if i == 1 {
                gen.add_transaction(transaction(1));
                gen.add_transaction(transaction(2));
                gen.set_nonce(42);
                gen.offset_time(-5);
                gen.add_uncle(uncle.clone());
            }
        });

        assert!(chain[0].body.transactions.is_empty());
        assert_eq!(chain[1].body.transactions.len(), 2);
        assert_eq!(chain[1].header.nonce, 42);
        assert_eq!(chain[1].header.time, GENESIS_TIME + 2 * BLOCK_INTERVAL - 5);
        assert_eq!(chain[1].body.uncles, vec![uncle]);
        assert_ne!(chain[1].header.tx_hash, ZERO_HASH);
        assert_eq!(chain[2].parent_hash(), chain[1].hash());
    }
}
