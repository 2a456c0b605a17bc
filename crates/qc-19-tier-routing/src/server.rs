//! # Request Server
//!
//! Answers peer requests from the locally hosted backend.
//!
//! | Key    | Shape                  | Lookup                     |
//! |--------|------------------------|----------------------------|
//! | Hash   | block / header view    | block by hash              |
//! | Number | hash                   | canonical hash by number   |
//! | Number | block / header view    | number -> hash -> block    |
//! | Hash   | hash                   | unsupported                |
//!
//! A miss is answered with the explicitly-empty variant of the requested
//! shape so the peer can tell "not found" from "no answer".

use std::sync::Arc;

use qc_18_wire_codec::{
    encode_response, Request, RequestKey, Response, ResponseData, ResultShape, WireCodec,
};
use shared_types::{Hash, WorkObject};
use tracing::debug;

use crate::domain::RoutingError;
use crate::registry::BackendRegistry;

pub struct RequestServer {
    registry: Arc<BackendRegistry>,
    codec: WireCodec,
}

impl RequestServer {
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self {
            registry,
            codec: WireCodec::new(),
        }
    }

    pub fn serve(&self, request: &Request) -> Result<Response, RoutingError> {
        let backend = self.registry.resolve(&request.location)?;

        let block = |hash: Option<Hash>| -> Option<WorkObject> {
            hash.and_then(|h| backend.block_by_hash(&h))
        };

        let data = match (request.key, request.shape) {
            (RequestKey::Hash(_), ResultShape::Hash) => {
                return Err(RoutingError::UnsupportedRequest {
                    key: request.key,
                    shape: request.shape,
                })
            }
            (RequestKey::Number(n), ResultShape::Hash) => {
                ResponseData::Hash(backend.block_hash_by_number(n))
            }
            (key, shape) => {
                let hash = match key {
                    RequestKey::Hash(hash) => Some(hash),
                    RequestKey::Number(n) => backend.block_hash_by_number(n),
                };
                project(block(hash), shape)
            }
        };

        debug!(
            id = request.id,
            location = %request.location,
            shape = %request.shape,
            found = !data.is_empty(),
            "[qc-19] Served request"
        );

        Ok(Response {
            id: request.id,
            location: request.location,
            data,
        })
    }

    /// Decode a request message, serve it and encode the response.
    pub fn serve_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, RoutingError> {
        let request = self.codec.decode_request(bytes)?;
        let response = self.serve(&request)?;
        Ok(encode_response(&response))
    }
}

fn project(block: Option<WorkObject>, shape: ResultShape) -> ResponseData {
    match shape {
        ResultShape::BlockView => ResponseData::BlockView(block.map(|wo| wo.block_view())),
        ResultShape::HeaderView => ResponseData::HeaderView(block.map(|wo| wo.header_view())),
        ResultShape::Hash => ResponseData::Hash(block.map(|wo| wo.hash())),
    }
}
