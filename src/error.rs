//! Storage-layer error types.

use thiserror::Error;

use crate::engine::EngineError;

/// Errors surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The engine cannot produce a snapshot or transaction (closed, or it
    /// failed to open).
    #[error("engine unavailable: {0}")]
    EngineUnavailable(#[source] EngineError),

    /// A batch could not be staged and committed atomically. No partial
    /// effects are observable.
    #[error("write failed: {0}")]
    WriteFailed(#[source] EngineError),

    /// A physical key could not be decoded to a (column family, key) pair.
    ///
    /// Defensive: this cannot occur under correct encoding and indicates
    /// keyspace corruption.
    #[error("corrupt physical key: {0:02x?}")]
    CorruptKey(Vec<u8>),

    /// An engine failure on the read path, distinct from "not found".
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for storage-layer operations.
pub type Result<T> = std::result::Result<T, Error>;
