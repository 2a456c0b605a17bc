//! Protobuf wire schema.
//!
//! Hand-written `prost` message definitions. The equivalent `.proto`:
//!
//! ```text
//! message ProtoMessage {
//!   oneof payload { ProtoRequestMessage request = 1; ProtoResponseMessage response = 2; }
//! }
//! message ProtoRequestMessage {
//!   uint32 id = 1;
//!   ProtoLocation location = 2;
//!   oneof data    { ProtoHash hash = 3; bytes number = 4; }
//!   oneof request { ProtoEmpty work_object_block = 5; ProtoEmpty work_object_header = 6;
//!                   ProtoEmpty block_hash = 7; }
//! }
//! message ProtoResponseMessage {
//!   uint32 id = 1;
//!   ProtoLocation location = 2;
//!   oneof response { ProtoWorkObjectBlockView work_object_block_view = 3;
//!                    ProtoWorkObjectHeaderView work_object_header_view = 4;
//!                    ProtoHash block_hash = 5; }
//! }
//! ```
//!
//! A oneof variant whose inner message is empty is still present on the
//! wire. That is how a peer says "not found" rather than not answering.

/// Variable-length tuple of index bytes; the tier is implied by the length.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLocation {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoHash {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

/// Marker message used for the requested result shape.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoEmpty {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkObjectHeader {
    #[prost(message, optional, tag = "1")]
    pub parent_hash: Option<ProtoHash>,
    #[prost(uint64, tag = "2")]
    pub number: u64,
    /// Big-endian, no leading zeros.
    #[prost(bytes = "vec", tag = "3")]
    pub difficulty: Vec<u8>,
    #[prost(message, optional, tag = "4")]
    pub tx_hash: Option<ProtoHash>,
    #[prost(message, optional, tag = "5")]
    pub location: Option<ProtoLocation>,
    #[prost(uint64, tag = "6")]
    pub time: u64,
    #[prost(uint64, tag = "7")]
    pub nonce: u64,
    #[prost(message, optional, tag = "8")]
    pub mix_hash: Option<ProtoHash>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTransaction {
    #[prost(uint64, tag = "1")]
    pub chain_id: u64,
    #[prost(uint64, tag = "2")]
    pub nonce: u64,
    #[prost(uint64, tag = "3")]
    pub gas: u64,
    /// Empty for contract creation, otherwise 20 bytes.
    #[prost(bytes = "vec", tag = "4")]
    pub to: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub value: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub data: Vec<u8>,
    #[prost(bytes = "vec", tag = "7")]
    pub signature: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTransactions {
    #[prost(message, repeated, tag = "1")]
    pub transactions: Vec<ProtoTransaction>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkObjectBody {
    #[prost(message, repeated, tag = "1")]
    pub transactions: Vec<ProtoTransaction>,
    #[prost(message, repeated, tag = "2")]
    pub uncles: Vec<ProtoWorkObjectHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkObject {
    #[prost(message, optional, tag = "1")]
    pub wo_header: Option<ProtoWorkObjectHeader>,
    #[prost(message, optional, tag = "2")]
    pub wo_body: Option<ProtoWorkObjectBody>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkObjectBlockView {
    #[prost(message, optional, tag = "1")]
    pub work_object: Option<ProtoWorkObject>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkObjectHeaderView {
    #[prost(message, optional, tag = "1")]
    pub work_object: Option<ProtoWorkObject>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoRequestMessage {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(message, optional, tag = "2")]
    pub location: Option<ProtoLocation>,
    #[prost(oneof = "proto_request_message::Data", tags = "3, 4")]
    pub data: Option<proto_request_message::Data>,
    #[prost(oneof = "proto_request_message::Request", tags = "5, 6, 7")]
    pub request: Option<proto_request_message::Request>,
}

pub mod proto_request_message {
    /// Lookup key.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "3")]
        Hash(super::ProtoHash),
        /// Big-endian, no leading zeros.
        #[prost(bytes, tag = "4")]
        Number(Vec<u8>),
    }

    /// Requested result shape.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Request {
        #[prost(message, tag = "5")]
        WorkObjectBlock(super::ProtoEmpty),
        #[prost(message, tag = "6")]
        WorkObjectHeader(super::ProtoEmpty),
        #[prost(message, tag = "7")]
        BlockHash(super::ProtoEmpty),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoResponseMessage {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(message, optional, tag = "2")]
    pub location: Option<ProtoLocation>,
    #[prost(oneof = "proto_response_message::Response", tags = "3, 4, 5")]
    pub response: Option<proto_response_message::Response>,
}

pub mod proto_response_message {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Response {
        #[prost(message, tag = "3")]
        WorkObjectBlockView(super::ProtoWorkObjectBlockView),
        #[prost(message, tag = "4")]
        WorkObjectHeaderView(super::ProtoWorkObjectHeaderView),
        #[prost(message, tag = "5")]
        BlockHash(super::ProtoHash),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMessage {
    #[prost(oneof = "proto_message::Payload", tags = "1, 2")]
    pub payload: Option<proto_message::Payload>,
}

pub mod proto_message {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Payload {
        #[prost(message, tag = "1")]
        Request(super::ProtoRequestMessage),
        #[prost(message, tag = "2")]
        Response(super::ProtoResponseMessage),
    }
}
