//! # Wire Codec Errors

use shared_types::LocationError;
use thiserror::Error;

/// Errors raised while decoding peer bytes or converting protobuf messages
/// into domain values.
#[derive(Debug, Error)]
pub enum WireError {
    /// Bytes are not a well-formed protobuf message.
    #[error("Protobuf decode failed: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Envelope carries neither a request nor a response.
    #[error("Message carries neither a request nor a response")]
    EmptyEnvelope,

    /// A required field is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid hash length: {0} bytes (expected 32)")]
    InvalidHashLength(usize),

    #[error("Invalid address length: {0} bytes (expected 20)")]
    InvalidAddressLength(usize),

    /// Big-endian integer wider than its target type.
    #[error("Field {field} is {len} bytes wide (max {max})")]
    NumberTooWide {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error(transparent)]
    Location(#[from] LocationError),

    /// Peer answered, but with an empty payload: the object is not known.
    #[error("Received empty response from peer (request {id})")]
    EmptyResponse { id: u32 },

    /// Response carries no payload variant at all.
    #[error("Response to request {id} carries no payload")]
    InvalidResponse { id: u32 },

    /// Payload kind name outside the supported set.
    #[error("Unsupported data type: {0}")]
    UnsupportedType(String),
}

impl WireError {
    /// True when the peer reported "not found" rather than misbehaving.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WireError::EmptyResponse { .. })
    }

    /// Request id carried by response-level failures.
    pub fn request_id(&self) -> Option<u32> {
        match self {
            WireError::EmptyResponse { id } | WireError::InvalidResponse { id } => Some(*id),
            _ => None,
        }
    }
}
