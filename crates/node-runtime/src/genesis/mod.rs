//! # Genesis Module
//!
//! Genesis block creation for every hosted chain.
//!
//! The genesis block of each location has these properties:
//!
//! - Height: 0
//! - Parent hash: 32 zero bytes
//! - Empty body
//! - Timestamp: `DEFAULT_GENESIS_TIME` unless configured
//! - Mix hash: Keccak256(chain id || location bytes)

pub mod builder;

pub use builder::{GenesisBuilder, GenesisConfig, GenesisError, DEFAULT_GENESIS_TIME};
