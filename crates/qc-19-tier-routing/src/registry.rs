//! # Backend Registry
//!
//! Fixed-size table of consensus backends keyed by [`Location`]:
//! one Prime slot, `MAX_REGIONS` Region slots and
//! `MAX_REGIONS × MAX_ZONES` Zone slots.
//!
//! ## Concurrency
//!
//! Every slot has its own `RwLock`. Lookups take a read lock and clone the
//! `Arc`, so a registration (write-rare) never blocks dispatch to other
//! slots and never exposes a half-written handle.

use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::{Hash, Location, WorkObject, MAX_REGIONS, MAX_ZONES};
use tracing::{debug, info};

use crate::domain::RoutingError;
use crate::ports::ConsensusBackend;

type Slot = RwLock<Option<Arc<dyn ConsensusBackend>>>;

fn empty_slot() -> Slot {
    RwLock::new(None)
}

/// Process-wide table of locally hosted backends.
pub struct BackendRegistry {
    prime: Slot,
    regions: [Slot; MAX_REGIONS],
    zones: [[Slot; MAX_ZONES]; MAX_REGIONS],
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            prime: empty_slot(),
            regions: std::array::from_fn(|_| empty_slot()),
            zones: std::array::from_fn(|_| std::array::from_fn(|_| empty_slot())),
        }
    }

    fn slot(&self, location: &Location) -> Option<&Slot> {
        match *location {
            Location::Prime => Some(&self.prime),
            Location::Region(r) => self.regions.get(r as usize),
            Location::Zone(r, z) => self
                .zones
                .get(r as usize)
                .and_then(|row| row.get(z as usize)),
        }
    }

    /// Store `backend` for `location`, replacing any previous handle.
    pub fn register(
        &self,
        location: Location,
        backend: Arc<dyn ConsensusBackend>,
    ) -> Result<(), RoutingError> {
        let slot = self
            .slot(&location)
            .ok_or(RoutingError::OutOfBounds(location))?;

        let replaced = slot.write().replace(backend).is_some();
        info!(%location, replaced, "[qc-19] Backend registered");
        Ok(())
    }

    /// Look up the backend for `location`. Out-of-range locations are
    /// simply unhosted.
    pub fn resolve(&self, location: &Location) -> Result<Arc<dyn ConsensusBackend>, RoutingError> {
        self.slot(location)
            .and_then(|slot| slot.read().clone())
            .ok_or(RoutingError::Unhosted(*location))
    }

    pub fn is_hosted(&self, location: &Location) -> bool {
        self.resolve(location).is_ok()
    }

    /// Registered locations: Prime, then Regions, then Zones.
    pub fn hosted_locations(&self) -> Vec<Location> {
        self.entries().into_iter().map(|(loc, _)| loc).collect()
    }

    /// Snapshot of every registered (location, backend), Prime first.
    fn entries(&self) -> Vec<(Location, Arc<dyn ConsensusBackend>)> {
        let mut entries = Vec::new();
        if let Some(backend) = self.prime.read().clone() {
            entries.push((Location::Prime, backend));
        }
        for (r, slot) in self.regions.iter().enumerate() {
            if let Some(backend) = slot.read().clone() {
                entries.push((Location::Region(r as u8), backend));
            }
        }
        for (r, row) in self.zones.iter().enumerate() {
            for (z, slot) in row.iter().enumerate() {
                if let Some(backend) = slot.read().clone() {
                    entries.push((Location::Zone(r as u8, z as u8), backend));
                }
            }
        }
        entries
    }

    /// Push the topology epoch to every registered backend, Prime first,
    /// then Regions, then Zones. Empty slots are skipped.
    ///
    /// Slot locks are released before calling into backends.
    pub fn broadcast_expansion_number(&self, expansion_number: u8) {
        let entries = self.entries();
        for (location, backend) in &entries {
            debug!(%location, expansion_number, "[qc-19] Setting expansion number");
            backend.set_expansion_number(expansion_number);
        }
        info!(
            expansion_number,
            backends = entries.len(),
            "[qc-19] Expansion number broadcast"
        );
    }

    // -------------------------------------------------------------------------
    // Pass-throughs to the hosted backend
    // -------------------------------------------------------------------------

    pub fn write_genesis_block(
        &self,
        block: &WorkObject,
        location: &Location,
    ) -> Result<(), RoutingError> {
        self.resolve(location)?.write_genesis_block(block, location);
        Ok(())
    }

    /// Attach `child` (serving `child_location`) to the backend at `node_location`.
    pub fn set_child_backend(
        &self,
        node_location: &Location,
        child: Arc<dyn ConsensusBackend>,
        child_location: Location,
    ) -> Result<(), RoutingError> {
        self.resolve(node_location)?
            .set_child_backend(child, child_location);
        Ok(())
    }

    pub fn set_parent_backend(
        &self,
        node_location: &Location,
        parent: Arc<dyn ConsensusBackend>,
    ) -> Result<(), RoutingError> {
        self.resolve(node_location)?.set_parent_backend(parent);
        Ok(())
    }

    pub fn add_genesis_pending_cross_tier(
        &self,
        block: &WorkObject,
        location: &Location,
    ) -> Result<(), RoutingError> {
        self.resolve(location)?.add_genesis_pending_cross_tier(block);
        Ok(())
    }

    pub fn lookup_block(
        &self,
        hash: &Hash,
        location: &Location,
    ) -> Result<Option<WorkObject>, RoutingError> {
        Ok(self.resolve(location)?.block_by_hash(hash))
    }

    pub fn lookup_block_hash_by_number(
        &self,
        number: u64,
        location: &Location,
    ) -> Result<Option<Hash>, RoutingError> {
        Ok(self.resolve(location)?.block_hash_by_number(number))
    }

    pub fn is_fully_synchronized(&self, location: &Location) -> Result<bool, RoutingError> {
        Ok(self.resolve(location)?.is_fully_synchronized())
    }
}
