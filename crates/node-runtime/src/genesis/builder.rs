//! # Genesis Block Builder
//!
//! Creates the deterministic genesis work object for each hosted chain.

use qc_19_tier_routing::{BackendRegistry, RoutingError};
use sha3::{Digest, Keccak256};
use shared_types::{
    hash_hex, Hash, Location, Tier, WorkObject, WorkObjectBody, WorkObjectHeader, U256, ZERO_HASH,
};
use thiserror::Error;
use tracing::info;

/// Genesis block creation errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// Invalid genesis configuration.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),

    /// Writing to a hosted backend failed.
    #[error("Failed to write genesis: {0}")]
    Routing(#[from] RoutingError),
}

/// Default genesis timestamp (Unix seconds). Every node that keeps the
/// default agrees on the same genesis hashes.
pub const DEFAULT_GENESIS_TIME: u64 = 1_700_000_000;

/// Genesis block configuration.
#[derive(Debug, Clone)]
pub struct GenesisConfig {
    /// Chain id mixed into every genesis block.
    pub chain_id: u64,

    /// Genesis timestamp (Unix seconds).
    pub timestamp: u64,

    /// Starting difficulty.
    pub difficulty: U256,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            chain_id: 9000,
            timestamp: DEFAULT_GENESIS_TIME,
            difficulty: U256::from(1_000_000u64),
        }
    }
}

impl GenesisConfig {
    pub fn validate(&self) -> Result<(), GenesisError> {
        if self.difficulty.is_zero() {
            return Err(GenesisError::InvalidConfig(
                "Difficulty must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for per-location genesis blocks.
pub struct GenesisBuilder {
    config: GenesisConfig,
}

impl GenesisBuilder {
    pub fn new(config: GenesisConfig) -> Result<Self, GenesisError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Genesis for `location`: height 0, no parent, empty body.
    pub fn build(&self, location: Location) -> WorkObject {
        WorkObject::new(
            WorkObjectHeader {
                parent_hash: ZERO_HASH,
                number: 0,
                difficulty: self.config.difficulty,
                tx_hash: ZERO_HASH,
                location,
                time: self.config.timestamp,
                nonce: self.config.chain_id,
                mix_hash: genesis_seed(self.config.chain_id, &location),
            },
            WorkObjectBody::default(),
        )
    }

    /// Write genesis to every hosted backend. Prime and Region backends
    /// also receive the genesis as pending cross-tier data.
    pub fn initialize(&self, registry: &BackendRegistry) -> Result<Vec<Hash>, GenesisError> {
        let mut hashes = Vec::new();

        for location in registry.hosted_locations() {
            let genesis = self.build(location);
            registry.write_genesis_block(&genesis, &location)?;
            if location.tier() != Tier::Zone {
                registry.add_genesis_pending_cross_tier(&genesis, &location)?;
            }

            info!(%location, hash = %hash_hex(&genesis.hash()), "[node] Genesis initialized");
            hashes.push(genesis.hash());
        }
        Ok(hashes)
    }
}

/// Keccak256(chain_id || location bytes).
fn genesis_seed(chain_id: u64, location: &Location) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(chain_id.to_be_bytes());
    hasher.update(location.to_bytes());
    hasher.finalize().into()
}
