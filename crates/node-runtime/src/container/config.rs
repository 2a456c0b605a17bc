//! # Node Configuration
//!
//! Unified configuration for routing and telemetry.
//!
//! ## Environment Variables
//!
//! | Variable              | Default                   | Meaning                          |
//! |-----------------------|---------------------------|----------------------------------|
//! | `QC_HOSTED_LOCATIONS` | `prime,region-0,zone-0-0` | chains with a local backend      |
//! | `QC_EXPANSION_NUMBER` | `0`                       | initial topology epoch           |
//! | `QC_POOL_CAPACITY`    | `1024`                    | idle gossip containers retained  |
//! | `QC_CHAIN_ID`         | `9000`                    | genesis chain id                 |
//!
//! Telemetry variables are documented on [`TelemetryConfig::from_env`].

use std::collections::HashSet;
use std::env;

use quantum_telemetry::TelemetryConfig;
use shared_types::{Location, LocationError};
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Routing configuration.
    pub routing: RoutingConfig,
    /// Logging and metrics configuration.
    pub telemetry: TelemetryConfig,
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            routing: RoutingConfig::from_lookup(|key| env::var(key).ok())?,
            telemetry: TelemetryConfig::for_subsystem("19", "tier-routing"),
        })
    }

    /// Reject configurations the registry cannot host.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.routing.validate()
    }
}

/// Routing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingConfig {
    /// Locations this node runs a backend for.
    pub hosted_locations: Vec<Location>,
    /// Initial expansion number broadcast at startup.
    pub expansion_number: u8,
    /// Maximum idle payload containers kept by the gossip pool.
    pub pool_capacity: usize,
    /// Chain id stamped into genesis blocks.
    pub chain_id: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            hosted_locations: vec![Location::prime(), Location::region(0), Location::zone(0, 0)],
            expansion_number: 0,
            pool_capacity: 1024,
            chain_id: 9000,
        }
    }
}

impl RoutingConfig {
    /// Build from a key lookup, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let hosted_locations = match lookup("QC_HOSTED_LOCATIONS") {
            Some(raw) => parse_locations(&raw)?,
            None => defaults.hosted_locations,
        };

        Ok(Self {
            hosted_locations,
            expansion_number: parse_or(&lookup, "QC_EXPANSION_NUMBER", defaults.expansion_number)?,
            pool_capacity: parse_or(&lookup, "QC_POOL_CAPACITY", defaults.pool_capacity)?,
            chain_id: parse_or(&lookup, "QC_CHAIN_ID", defaults.chain_id)?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hosted_locations.is_empty() {
            return Err(ConfigError::NoHostedLocations);
        }

        let mut seen = HashSet::new();
        for location in &self.hosted_locations {
            if !location.is_within_bounds() {
                return Err(ConfigError::OutOfBounds(*location));
            }
            if !seen.insert(*location) {
                return Err(ConfigError::DuplicateLocation(*location));
            }
        }

        if self.pool_capacity == 0 {
            return Err(ConfigError::ZeroPoolCapacity);
        }
        Ok(())
    }
}

fn parse_locations(raw: &str) -> Result<Vec<Location>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Location>().map_err(ConfigError::InvalidLocation))
        .collect()
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
        }),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid hosted location: {0}")]
    InvalidLocation(#[from] LocationError),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("At least one hosted location is required")]
    NoHostedLocations,

    #[error("Hosted location {0} listed more than once")]
    DuplicateLocation(Location),

    #[error("Hosted location {0} is outside the hierarchy bounds")]
    OutOfBounds(Location),

    #[error("Pool capacity must be greater than zero")]
    ZeroPoolCapacity,
}
