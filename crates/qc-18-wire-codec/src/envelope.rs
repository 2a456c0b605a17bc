//! # Request/Response Envelope
//!
//! Correlated request/response messages exchanged between peers.
//!
//! ## Response outcomes
//!
//! | Wire state of the response field | Decode result |
//! |----------------------------------|---------------|
//! | absent                           | [`WireError::InvalidResponse`] |
//! | present, no payload              | [`WireError::EmptyResponse`] ("not found") |
//! | present with payload             | `Ok`, re-stamped with the envelope location |

use std::fmt;

use prost::Message;
use quantum_telemetry::WireMetrics;
use shared_types::{Hash, Location, WorkObjectBlockView, WorkObjectHeaderView};
use tracing::trace;

use crate::convert::{
    hash_from_proto, hash_to_proto, location_from_proto, location_to_proto, u64_from_bytes,
    u64_to_bytes, work_object_from_proto, work_object_to_proto,
};
use crate::errors::WireError;
use crate::proto::{
    proto_message, proto_request_message, proto_response_message, ProtoEmpty, ProtoHash,
    ProtoMessage, ProtoRequestMessage, ProtoResponseMessage, ProtoWorkObjectBlockView,
    ProtoWorkObjectHeaderView,
};

/// Lookup key of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKey {
    Hash(Hash),
    Number(u64),
}

/// Result shape the requester wants back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultShape {
    BlockView,
    HeaderView,
    Hash,
}

impl ResultShape {
    pub const ALL: [ResultShape; 3] = [
        ResultShape::BlockView,
        ResultShape::HeaderView,
        ResultShape::Hash,
    ];

    /// Metric label for successful decodes of this shape.
    pub fn label(&self) -> &'static str {
        match self {
            ResultShape::BlockView => "blocks",
            ResultShape::HeaderView => "headers",
            ResultShape::Hash => "hashes",
        }
    }
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub id: u32,
    pub location: Location,
    pub key: RequestKey,
    pub shape: ResultShape,
}

/// Response payload for one shape. `None` means "not found".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseData {
    BlockView(Option<WorkObjectBlockView>),
    HeaderView(Option<WorkObjectHeaderView>),
    Hash(Option<Hash>),
}

impl ResponseData {
    /// The "not found" answer for `shape`.
    pub fn empty(shape: ResultShape) -> Self {
        match shape {
            ResultShape::BlockView => ResponseData::BlockView(None),
            ResultShape::HeaderView => ResponseData::HeaderView(None),
            ResultShape::Hash => ResponseData::Hash(None),
        }
    }

    pub fn shape(&self) -> ResultShape {
        match self {
            ResponseData::BlockView(_) => ResultShape::BlockView,
            ResponseData::HeaderView(_) => ResultShape::HeaderView,
            ResponseData::Hash(_) => ResultShape::Hash,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ResponseData::BlockView(v) => v.is_none(),
            ResponseData::HeaderView(v) => v.is_none(),
            ResponseData::Hash(v) => v.is_none(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub id: u32,
    pub location: Location,
    pub data: ResponseData,
}

/// A decoded top-level message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Envelope {
    Request(Request),
    Response(Response),
}

// =============================================================================
// ENCODE
// =============================================================================

pub fn request_to_proto(request: &Request) -> ProtoRequestMessage {
    let data = match request.key {
        RequestKey::Hash(hash) => proto_request_message::Data::Hash(hash_to_proto(&hash)),
        RequestKey::Number(n) => proto_request_message::Data::Number(u64_to_bytes(n)),
    };
    let shape = match request.shape {
        ResultShape::BlockView => proto_request_message::Request::WorkObjectBlock(ProtoEmpty {}),
        ResultShape::HeaderView => proto_request_message::Request::WorkObjectHeader(ProtoEmpty {}),
        ResultShape::Hash => proto_request_message::Request::BlockHash(ProtoEmpty {}),
    };

    ProtoRequestMessage {
        id: request.id,
        location: Some(location_to_proto(&request.location)),
        data: Some(data),
        request: Some(shape),
    }
}

/// A `None` payload becomes the explicitly-empty variant of its shape.
pub fn response_to_proto(response: &Response) -> ProtoResponseMessage {
    use proto_response_message::Response as Variant;

    let variant = match &response.data {
        ResponseData::BlockView(view) => Variant::WorkObjectBlockView(ProtoWorkObjectBlockView {
            work_object: view
                .as_ref()
                .map(|v| work_object_to_proto(v.work_object(), true)),
        }),
        ResponseData::HeaderView(view) => {
            Variant::WorkObjectHeaderView(ProtoWorkObjectHeaderView {
                work_object: view
                    .as_ref()
                    .map(|v| work_object_to_proto(v.work_object(), false)),
            })
        }
        ResponseData::Hash(hash) => Variant::BlockHash(
            hash.as_ref()
                .map(hash_to_proto)
                .unwrap_or(ProtoHash { value: Vec::new() }),
        ),
    };

    ProtoResponseMessage {
        id: response.id,
        location: Some(location_to_proto(&response.location)),
        response: Some(variant),
    }
}

/// Serialize a request inside the top-level message.
pub fn encode_request(request: &Request) -> Vec<u8> {
    ProtoMessage {
        payload: Some(proto_message::Payload::Request(request_to_proto(request))),
    }
    .encode_to_vec()
}

/// Serialize a response inside the top-level message.
pub fn encode_response(response: &Response) -> Vec<u8> {
    ProtoMessage {
        payload: Some(proto_message::Payload::Response(response_to_proto(response))),
    }
    .encode_to_vec()
}

// =============================================================================
// DECODE
// =============================================================================

pub fn request_from_proto(proto: &ProtoRequestMessage) -> Result<Request, WireError> {
    let location = location_from_proto(&proto.location)?;

    // prost leaves a oneof unset when its tag is unknown, so absent and
    // unrecognized look the same here.
    let key = match proto.data.as_ref().ok_or_else(|| {
        WireError::UnsupportedType(format!(
            "request key (ProtoRequestMessage.data) in request {}",
            proto.id
        ))
    })? {
        proto_request_message::Data::Hash(hash) => RequestKey::Hash(hash_from_proto(hash)?),
        proto_request_message::Data::Number(bytes) => {
            RequestKey::Number(u64_from_bytes(bytes, "number")?)
        }
    };

    let shape = match proto.request.as_ref().ok_or_else(|| {
        WireError::UnsupportedType(format!(
            "request result shape (ProtoRequestMessage.request) in request {}",
            proto.id
        ))
    })? {
        proto_request_message::Request::WorkObjectBlock(_) => ResultShape::BlockView,
        proto_request_message::Request::WorkObjectHeader(_) => ResultShape::HeaderView,
        proto_request_message::Request::BlockHash(_) => ResultShape::Hash,
    };

    Ok(Request {
        id: proto.id,
        location,
        key,
        shape,
    })
}

/// Stateless response decode. Use [`WireCodec`] to also count successes.
pub fn response_from_proto(proto: &ProtoResponseMessage) -> Result<Response, WireError> {
    use proto_response_message::Response as Variant;

    let id = proto.id;
    let location = location_from_proto(&proto.location)?;

    let data = match proto
        .response
        .as_ref()
        .ok_or(WireError::InvalidResponse { id })?
    {
        Variant::WorkObjectBlockView(view) => {
            let wo = view
                .work_object
                .as_ref()
                .ok_or(WireError::EmptyResponse { id })?;
            ResponseData::BlockView(Some(WorkObjectBlockView(work_object_from_proto(
                wo, &location,
            )?)))
        }
        Variant::WorkObjectHeaderView(view) => {
            let wo = view
                .work_object
                .as_ref()
                .ok_or(WireError::EmptyResponse { id })?;
            let mut decoded = work_object_from_proto(wo, &location)?;
            decoded.body.transactions.clear();
            ResponseData::HeaderView(Some(WorkObjectHeaderView(decoded)))
        }
        Variant::BlockHash(hash) => {
            if hash.value.is_empty() {
                return Err(WireError::EmptyResponse { id });
            }
            ResponseData::Hash(Some(hash_from_proto(hash)?))
        }
    };

    Ok(Response { id, location, data })
}

/// Envelope decoder with optional decode-success metrics.
#[derive(Clone, Default)]
pub struct WireCodec {
    metrics: Option<WireMetrics>,
}

impl WireCodec {
    pub fn new() -> Self {
        Self { metrics: None }
    }

    pub fn with_metrics(metrics: WireMetrics) -> Self {
        Self {
            metrics: Some(metrics),
        }
    }

    /// Decode a top-level message from peer bytes. Never panics.
    pub fn decode(&self, bytes: &[u8]) -> Result<Envelope, WireError> {
        let message = ProtoMessage::decode(bytes)?;
        match message.payload.ok_or(WireError::EmptyEnvelope)? {
            proto_message::Payload::Request(req) => {
                request_from_proto(&req).map(Envelope::Request)
            }
            proto_message::Payload::Response(resp) => {
                self.decode_response(&resp).map(Envelope::Response)
            }
        }
    }

    pub fn decode_request(&self, bytes: &[u8]) -> Result<Request, WireError> {
        match self.decode(bytes)? {
            Envelope::Request(request) => Ok(request),
            Envelope::Response(_) => Err(WireError::MissingField("request")),
        }
    }

    /// Decode a response message and count the success by shape.
    pub fn decode_response(&self, proto: &ProtoResponseMessage) -> Result<Response, WireError> {
        let response = response_from_proto(proto)?;
        let shape = response.data.shape();
        if let Some(metrics) = &self.metrics {
            metrics.inc_decoded(shape.label());
        }
        trace!(
            id = response.id,
            location = %response.location,
            shape = %shape,
            "[qc-18] Decoded response"
        );
        Ok(response)
    }
}
