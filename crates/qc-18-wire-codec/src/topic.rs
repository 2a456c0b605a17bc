//! Gossip topic naming: `"<location>/<kind>"`, e.g. `zone-0-1/blocks`.

use std::fmt;
use std::str::FromStr;

use shared_types::Location;

use crate::errors::WireError;
use crate::marshal::WireKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Topic {
    pub location: Location,
    pub kind: WireKind,
}

impl Topic {
    pub fn new(location: Location, kind: WireKind) -> Self {
        Self { location, kind }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.location, self.kind)
    }
}

impl FromStr for Topic {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (location, kind) = s
            .split_once('/')
            .ok_or_else(|| WireError::UnsupportedType(s.to_string()))?;
        Ok(Topic {
            location: location.parse()?,
            kind: kind.parse()?,
        })
    }
}
