//! # Wire Codec Subsystem (qc-18)
//!
//! Converts between domain objects and the compact protobuf wire schema.
//!
//! ## Surfaces
//!
//! - **Envelope**: correlated [`Request`] / [`Response`] messages wrapped in a
//!   top-level message. A response distinguishes "peer never answered this
//!   shape" ([`WireError::InvalidResponse`]) from "peer answered: not found"
//!   ([`WireError::EmptyResponse`]).
//! - **Generic marshal**: [`marshal`] / [`unmarshal`] over the closed set of
//!   gossip payload kinds ([`WireKind`]).
//! - **Topics**: [`Topic`] names a gossip stream by location and kind.
//!
//! ## Invariants
//!
//! - Decoding arbitrary bytes never panics.
//! - Decoded work objects carry the location they were received for, not
//!   the one they declare.

mod convert;
pub mod envelope;
pub mod errors;
pub mod marshal;
pub mod proto;
pub mod topic;

pub use envelope::{
    encode_request, encode_response, request_from_proto, request_to_proto, response_from_proto,
    response_to_proto, Envelope, Request, RequestKey, Response, ResponseData, ResultShape,
    WireCodec,
};
pub use errors::WireError;
pub use marshal::{marshal, unmarshal, unmarshal_declared, WireKind, WireObject};
pub use topic::Topic;
