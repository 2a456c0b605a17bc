//! # Error Types
//!
//! Errors raised while building or parsing shared domain values.

use thiserror::Error;

/// Errors from parsing a [`crate::Location`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// Wire form longer than the two tiers below Prime.
    #[error("Invalid location length: {0} bytes (max 2)")]
    InvalidLength(usize),

    /// Text form is not `prime`, `region-R` or `zone-R-Z`.
    #[error("Unparseable location: {0:?}")]
    Unparseable(String),
}
