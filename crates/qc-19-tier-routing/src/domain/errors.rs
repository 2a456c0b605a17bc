//! Tier routing error types.

use qc_18_wire_codec::{RequestKey, ResultShape, WireError};
use shared_types::Location;
use thiserror::Error;

/// Errors reported by a consensus backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend refused the input.
    #[error("Rejected by backend: {0}")]
    Rejected(String),

    /// The backend cannot take input right now.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors from registry lookups, dispatch and request serving.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No backend is registered for the location.
    #[error("No backend hosted for {0}")]
    Unhosted(Location),

    /// Location indices exceed the hierarchy bounds.
    #[error("Location {0} is outside the hierarchy bounds")]
    OutOfBounds(Location),

    /// Key/shape combination the server does not answer.
    #[error("Unsupported request: {key:?} key with {shape} shape")]
    UnsupportedRequest { key: RequestKey, shape: ResultShape },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

impl RoutingError {
    pub fn is_unhosted(&self) -> bool {
        matches!(self, RoutingError::Unhosted(_))
    }
}
