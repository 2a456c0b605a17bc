//! # Hierarchical Location
//!
//! Three-tier address of a chain in the hierarchy:
//!
//! ```text
//!                         [Prime]
//!            ┌───────────────┼───────────────┐
//!        [Region 0]      [Region 1]  ...  [Region R-1]
//!        ┌───┴───┐
//!   [Zone 0-0] [Zone 0-1] ... [Zone 0-(Z-1)]
//! ```
//!
//! Construction never clamps indices. Anything that maps a location onto
//! fixed-size storage must check [`Location::is_within_bounds`] first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LocationError;

/// Maximum number of regions under Prime.
pub const MAX_REGIONS: usize = 4;

/// Maximum number of zones under each region.
pub const MAX_ZONES: usize = 4;

/// Tier of the hierarchy a location addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// The single top-level chain.
    Prime,
    /// Middle tier, one per region.
    Region,
    /// Leaf tier, one per (region, zone) pair.
    Zone,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Prime => write!(f, "prime"),
            Tier::Region => write!(f, "region"),
            Tier::Zone => write!(f, "zone"),
        }
    }
}

/// Hierarchical address: which chain a message or backend belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Prime chain. Region and zone indices are meaningless here.
    #[default]
    Prime,
    /// Region chain `r`.
    Region(u8),
    /// Zone chain `z` nested under region `r`.
    Zone(u8, u8),
}

impl Location {
    pub const fn prime() -> Self {
        Location::Prime
    }

    pub const fn region(region: u8) -> Self {
        Location::Region(region)
    }

    pub const fn zone(region: u8, zone: u8) -> Self {
        Location::Zone(region, zone)
    }

    /// Tier classification.
    pub const fn tier(&self) -> Tier {
        match self {
            Location::Prime => Tier::Prime,
            Location::Region(_) => Tier::Region,
            Location::Zone(_, _) => Tier::Zone,
        }
    }

    /// Region index, if the tier has one.
    pub const fn region_index(&self) -> Option<usize> {
        match self {
            Location::Prime => None,
            Location::Region(r) | Location::Zone(r, _) => Some(*r as usize),
        }
    }

    /// Zone index, only meaningful for zone locations.
    pub const fn zone_index(&self) -> Option<usize> {
        match self {
            Location::Zone(_, z) => Some(*z as usize),
            _ => None,
        }
    }

    /// True if every meaningful index is below its bound.
    pub const fn is_within_bounds(&self) -> bool {
        match self {
            Location::Prime => true,
            Location::Region(r) => (*r as usize) < MAX_REGIONS,
            Location::Zone(r, z) => (*r as usize) < MAX_REGIONS && (*z as usize) < MAX_ZONES,
        }
    }

    /// The dominant (parent) chain. Prime has none.
    pub const fn dom(&self) -> Option<Location> {
        match self {
            Location::Prime => None,
            Location::Region(_) => Some(Location::Prime),
            Location::Zone(r, _) => Some(Location::Region(*r)),
        }
    }

    /// Wire form: one index byte per tier below Prime.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Location::Prime => Vec::new(),
            Location::Region(r) => vec![*r],
            Location::Zone(r, z) => vec![*r, *z],
        }
    }

    /// Inverse of [`Location::to_bytes`]. The tier is implied by the length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LocationError> {
        match *bytes {
            [] => Ok(Location::Prime),
            [r] => Ok(Location::Region(r)),
            [r, z] => Ok(Location::Zone(r, z)),
            _ => Err(LocationError::InvalidLength(bytes.len())),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Prime => write!(f, "prime"),
            Location::Region(r) => write!(f, "region-{}", r),
            Location::Zone(r, z) => write!(f, "zone-{}-{}", r, z),
        }
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "prime" {
            return Ok(Location::Prime);
        }

        let parse_index = |raw: &str| {
            raw.parse::<u8>()
                .map_err(|_| LocationError::Unparseable(s.to_string()))
        };

        if let Some(rest) = s.strip_prefix("region-") {
            return Ok(Location::Region(parse_index(rest)?));
        }
        if let Some(rest) = s.strip_prefix("zone-") {
            let (r, z) = rest
                .split_once('-')
                .ok_or_else(|| LocationError::Unparseable(s.to_string()))?;
            return Ok(Location::Zone(parse_index(r)?, parse_index(z)?));
        }

        Err(LocationError::Unparseable(s.to_string()))
    }
}
