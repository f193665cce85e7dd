//! Wire request and response types for the raw command surface.
//!
//! These are the transport-agnostic shapes of the four raw operations. The
//! RPC layer above this crate owns how they are framed; here they are plain
//! serializable structs.

use serde::{Deserialize, Serialize};

use crate::storage::RequestContext;

/// A key-value pair returned by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvPair {
    /// Logical key.
    pub key: Vec<u8>,
    /// Stored value.
    pub value: Vec<u8>,
}

/// Point lookup request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGetRequest {
    /// Routing metadata, passed through to the storage layer.
    pub ctx: RequestContext,
    /// Target column family.
    pub cf: String,
    /// Logical key to look up.
    pub key: Vec<u8>,
}

/// Point lookup response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGetResponse {
    /// The stored value; empty when `not_found` is set.
    pub value: Vec<u8>,
    /// Whether the lookup found nothing.
    ///
    /// A stored empty value is reported as not found, matching the wire
    /// behavior callers of this API already depend on.
    pub not_found: bool,
}

/// Point upsert request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPutRequest {
    /// Routing metadata, passed through to the storage layer.
    pub ctx: RequestContext,
    /// Target column family.
    pub cf: String,
    /// Logical key.
    pub key: Vec<u8>,
    /// Value to store.
    pub value: Vec<u8>,
}

/// Point upsert response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPutResponse {}

/// Point delete request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDeleteRequest {
    /// Routing metadata, passed through to the storage layer.
    pub ctx: RequestContext,
    /// Target column family.
    pub cf: String,
    /// Logical key to remove.
    pub key: Vec<u8>,
}

/// Point delete response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDeleteResponse {}

/// Range scan request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawScanRequest {
    /// Routing metadata, passed through to the storage layer.
    pub ctx: RequestContext,
    /// Target column family.
    pub cf: String,
    /// Scan from the first logical key >= this one.
    pub start_key: Vec<u8>,
    /// Maximum number of pairs to return. Zero yields an empty response.
    pub limit: u32,
}

/// Range scan response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScanResponse {
    /// Collected pairs, in key order.
    pub pairs: Vec<KvPair>,
}
