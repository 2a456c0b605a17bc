//! # In-Memory Consensus Backend
//!
//! Implements the [`ConsensusBackend`] port for one hosted location.
//! Blocks are kept by hash with a canonical number index; links to the
//! parent and child backends are held weakly so the hierarchy has no
//! reference cycles.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use qc_19_tier_routing::{BackendError, ConsensusBackend};
use shared_types::{hash_hex, Hash, Location, Transaction, WorkObject, WorkObjectHeader};
use tracing::{debug, info};

pub struct InMemoryBackend {
    location: Location,
    synced: AtomicBool,
    expansion_number: AtomicU8,
    blocks: RwLock<HashMap<Hash, WorkObject>>,
    canonical: RwLock<HashMap<u64, Hash>>,
    genesis_hash: RwLock<Option<Hash>>,
    pending_cross_tier: RwLock<Vec<Hash>>,
    parent: RwLock<Option<Weak<dyn ConsensusBackend>>>,
    children: RwLock<Vec<(Location, Weak<dyn ConsensusBackend>)>>,
    accepted_transactions: AtomicU64,
    accepted_work_shares: AtomicU64,
}

impl InMemoryBackend {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            synced: AtomicBool::new(false),
            expansion_number: AtomicU8::new(0),
            blocks: RwLock::new(HashMap::new()),
            canonical: RwLock::new(HashMap::new()),
            genesis_hash: RwLock::new(None),
            pending_cross_tier: RwLock::new(Vec::new()),
            parent: RwLock::new(None),
            children: RwLock::new(Vec::new()),
            accepted_transactions: AtomicU64::new(0),
            accepted_work_shares: AtomicU64::new(0),
        }
    }

    pub fn set_synchronized(&self, synced: bool) {
        self.synced.store(synced, Ordering::SeqCst);
    }

    pub fn expansion_number(&self) -> u8 {
        self.expansion_number.load(Ordering::SeqCst)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.read().len()
    }

    pub fn genesis_hash(&self) -> Option<Hash> {
        *self.genesis_hash.read()
    }

    pub fn pending_cross_tier(&self) -> Vec<Hash> {
        self.pending_cross_tier.read().clone()
    }

    pub fn accepted_transactions(&self) -> u64 {
        self.accepted_transactions.load(Ordering::Relaxed)
    }

    pub fn accepted_work_shares(&self) -> u64 {
        self.accepted_work_shares.load(Ordering::Relaxed)
    }

    /// Location of the attached parent, if it is still alive.
    pub fn parent_location(&self) -> Option<Location> {
        self.parent
            .read()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|parent| parent.location())
    }

    pub fn child_locations(&self) -> Vec<Location> {
        self.children
            .read()
            .iter()
            .filter(|(_, child)| child.strong_count() > 0)
            .map(|(location, _)| *location)
            .collect()
    }

    fn store(&self, block: &WorkObject) -> Hash {
        let hash = block.hash();
        self.blocks.write().insert(hash, block.clone());
        self.canonical.write().insert(block.number(), hash);
        hash
    }
}

impl ConsensusBackend for InMemoryBackend {
    fn location(&self) -> Location {
        self.location
    }

    fn is_fully_synchronized(&self) -> bool {
        self.synced.load(Ordering::SeqCst)
    }

    fn write_block(&self, block: &WorkObject) {
        let hash = self.store(block);
        debug!(
            location = %self.location,
            number = block.number(),
            hash = %hash_hex(&hash),
            "[node] Block written"
        );
    }

    fn accept_remote_transactions(&self, txs: &[Transaction]) -> Result<(), BackendError> {
        if !self.is_fully_synchronized() {
            return Err(BackendError::Unavailable(format!(
                "{} is still synchronizing",
                self.location
            )));
        }
        self.accepted_transactions
            .fetch_add(txs.len() as u64, Ordering::Relaxed);
        Ok(())
    }

    fn accept_work_share(&self, share: &WorkObjectHeader) -> Result<(), BackendError> {
        if share.location != self.location {
            return Err(BackendError::Rejected(format!(
                "work share for {} sent to {}",
                share.location, self.location
            )));
        }
        self.accepted_work_shares.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn set_expansion_number(&self, expansion_number: u8) {
        self.expansion_number
            .store(expansion_number, Ordering::SeqCst);
    }

    fn write_genesis_block(&self, block: &WorkObject, location: &Location) {
        let hash = self.store(block);
        *self.genesis_hash.write() = Some(hash);
        info!(%location, hash = %hash_hex(&hash), "[node] Genesis block written");
    }

    fn set_child_backend(&self, child: Arc<dyn ConsensusBackend>, child_location: Location) {
        let mut children = self.children.write();
        children.retain(|(location, _)| *location != child_location);
        children.push((child_location, Arc::downgrade(&child)));
    }

    fn set_parent_backend(&self, parent: Arc<dyn ConsensusBackend>) {
        *self.parent.write() = Some(Arc::downgrade(&parent));
    }

    fn add_genesis_pending_cross_tier(&self, block: &WorkObject) {
        self.pending_cross_tier.write().push(block.hash());
    }

    fn block_by_hash(&self, hash: &Hash) -> Option<WorkObject> {
        self.blocks.read().get(hash).cloned()
    }

    fn block_hash_by_number(&self, number: u64) -> Option<Hash> {
        self.canonical.read().get(&number).copied()
    }
}
