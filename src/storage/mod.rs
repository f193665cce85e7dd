//! Storage abstraction.
//!
//! This module defines the capability contract every storage backend must
//! satisfy, independent of the engine underneath:
//!
//! - [`Storage`] - snapshot reader acquisition and atomic batched writes
//! - [`StorageReader`] - point lookups and per-family iteration over one
//!   consistent snapshot
//! - [`CfIterator`] - a forward cursor over one column family
//! - [`Modify`] - one pending write operation within a batch
//!
//! The concrete single-node backend lives in [`standalone`].

mod keys;
mod modify;
mod standalone;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use keys::{cf_end_key, cf_start_key, decode_cf_key, encode_cf_key, KEY_SEPARATOR};
pub use modify::Modify;
pub use standalone::{CfIter, StandaloneReader, StandaloneStorage};

/// Opaque per-request routing metadata.
///
/// Accepted by every storage capability for forward compatibility with
/// routed, multi-tenant deployments; the standalone backend does not
/// interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {}

impl RequestContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// A storage backend: snapshot reads plus atomic batched writes.
///
/// Implementations must be thread-safe; one storage handle is shared by
/// every command handler in the process.
pub trait Storage: Send + Sync {
    /// The reader type for this backend.
    type Reader<'a>: StorageReader
    where
        Self: 'a;

    /// Acquire a reader over a fresh consistent snapshot.
    ///
    /// All reads through the returned reader observe the keyspace as of this
    /// call, regardless of concurrent writes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EngineUnavailable`](crate::Error::EngineUnavailable)
    /// if the backend cannot produce a snapshot.
    fn reader(&self, ctx: &RequestContext) -> Result<Self::Reader<'_>>;

    /// Apply `batch` atomically, in order.
    ///
    /// Either every [`Modify`] takes effect or none does; partial
    /// application is never observable, including across retries by the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteFailed`](crate::Error::WriteFailed) if the
    /// batch cannot be staged and committed.
    fn write(&self, ctx: &RequestContext, batch: Vec<Modify>) -> Result<()>;
}

/// Read access to one consistent snapshot of the keyspace.
///
/// A reader is exclusively owned by its acquirer. Dropping it releases the
/// snapshot; [`close`](StorageReader::close) does the same while surfacing
/// any release error.
pub trait StorageReader {
    /// The per-family iterator type.
    type Iter<'a>: CfIterator
    where
        Self: 'a;

    /// Get the value stored at `(cf, key)` as of this reader's snapshot.
    ///
    /// Returns `Ok(None)` when the key is absent; engine-level I/O failures
    /// surface as errors, distinct from absence.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn get_cf(&self, cf: &str, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Create an iterator scoped to `cf`, positioned before the first
    /// element. Callers must seek before reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying cursor cannot be created.
    fn iter_cf(&self, cf: &str) -> Result<Self::Iter<'_>>;

    /// Release the snapshot.
    ///
    /// Consumes the reader, so a snapshot cannot be released twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transaction fails to close.
    fn close(self) -> Result<()>;
}

/// A forward cursor over one column family's logical keys.
///
/// The iterator borrows its reader and is valid only for the reader's
/// lifetime. It is not restartable once exhausted.
pub trait CfIterator {
    /// Position at the first logical key >= `start_key` within the family.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying seek fails or a physical key in
    /// the family's range does not decode.
    fn seek(&mut self, start_key: &[u8]) -> Result<()>;

    /// Whether the current position refers to an existing element.
    fn valid(&self) -> bool;

    /// The element at the current position, or `None` when invalid.
    ///
    /// The key returned is the logical key, with the family prefix already
    /// stripped.
    fn item(&self) -> Option<(&[u8], &[u8])>;

    /// Advance one position. A no-op once the iterator is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying advance fails or a physical key
    /// does not decode.
    fn next(&mut self) -> Result<()>;
}

/// Shared ownership of a storage backend behaves like the backend itself.
///
/// This lets one process-wide handle be constructed at startup and handed to
/// every handler by `Arc` rather than reintroduced as a global.
impl<S: Storage> Storage for Arc<S> {
    type Reader<'a>
        = S::Reader<'a>
    where
        Self: 'a;

    fn reader(&self, ctx: &RequestContext) -> Result<Self::Reader<'_>> {
        (**self).reader(ctx)
    }

    fn write(&self, ctx: &RequestContext, batch: Vec<Modify>) -> Result<()> {
        (**self).write(ctx, batch)
    }
}
