//! # stratakv
//!
//! A single-node key-value storage layer exposing a small raw command API
//! (point get, point put, point delete, range scan) over an embedded
//! transactional engine, with column-family namespacing, snapshot-isolated
//! reads, and atomically-committed batched writes.
//!
//! # Overview
//!
//! Column families partition one logical keyspace while sharing one
//! physical engine: every `(family, key)` pair maps to a single physical
//! key through an order-preserving prefix encoding. Reads go through a
//! [`StorageReader`] bound to a consistent snapshot; writes go through
//! atomic [`Modify`] batches. The raw command layer translates wire
//! requests into those two capabilities and nothing else.
//!
//! # Example
//!
//! ```ignore
//! use stratakv::{CommandService, Config, RawGetRequest, RawPutRequest, StandaloneStorage};
//!
//! let storage = StandaloneStorage::open(&Config::new("/var/lib/stratakv"))?;
//! let service = CommandService::new(storage);
//!
//! service.raw_put(RawPutRequest {
//!     cf: "default".to_string(),
//!     key: b"k".to_vec(),
//!     value: b"v".to_vec(),
//!     ..Default::default()
//! })?;
//!
//! let resp = service.raw_get(RawGetRequest {
//!     cf: "default".to_string(),
//!     key: b"k".to_vec(),
//!     ..Default::default()
//! })?;
//! assert_eq!(resp.value, b"v");
//! ```
//!
//! # Modules
//!
//! - [`engine`] - the contract an embedded transactional engine satisfies
//! - [`backends`] - concrete engine implementations
//! - [`storage`] - the storage abstraction and its single-node backend
//! - [`command`] - the raw command handlers and their wire types

pub mod backends;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod storage;

pub use backends::{RedbConfig, RedbEngine};
pub use command::{
    CommandService, KvPair, RawDeleteRequest, RawDeleteResponse, RawGetRequest, RawGetResponse,
    RawPutRequest, RawPutResponse, RawScanRequest, RawScanResponse,
};
pub use config::Config;
pub use engine::{EngineError, EngineResult, KvCursor, KvEngine, KvTransaction};
pub use error::{Error, Result};
pub use storage::{
    CfIterator, Modify, RequestContext, StandaloneReader, StandaloneStorage, Storage,
    StorageReader,
};
