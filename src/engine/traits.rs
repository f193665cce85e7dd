//! Core engine traits.
//!
//! These traits describe the embedded transactional engine underneath the
//! storage layer: a single ordered byte keyspace with ACID transactions.
//! Column families do not exist at this level; they are layered on top by
//! the storage implementation through key encoding.

use super::EngineError;

/// A key-value pair produced by cursor operations.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// Result type for cursor operations that return a key-value pair.
pub type CursorResult = Result<Option<KeyValue>, EngineError>;

/// An embedded engine providing transactional key-value operations over one
/// ordered byte keyspace.
///
/// Implementations must be thread-safe (`Send + Sync`); the engine handle is
/// shared by every reader and writer in the process.
pub trait KvEngine: Send + Sync {
    /// The transaction type for this engine.
    type Txn<'a>: KvTransaction
    where
        Self: 'a;

    /// Begin a read-only transaction.
    ///
    /// Read transactions observe a consistent snapshot of the keyspace as of
    /// this call. Multiple read transactions may run concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Transaction`] if the transaction cannot be
    /// started.
    fn begin_read(&self) -> Result<Self::Txn<'_>, EngineError>;

    /// Begin a read-write transaction.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Transaction`] if the transaction cannot be
    /// started.
    fn begin_write(&self) -> Result<Self::Txn<'_>, EngineError>;
}

/// A transaction over the engine's keyspace.
///
/// Write transactions must be explicitly committed; dropping one without
/// committing rolls its changes back.
pub trait KvTransaction {
    /// The cursor type for ordered iteration.
    type Cursor<'a>: KvCursor
    where
        Self: 'a;

    /// Get the value stored at `key`.
    ///
    /// Returns `Ok(None)` when the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError>;

    /// Store `value` at `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ReadOnly`] on a read-only transaction, or an
    /// error if the write fails.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), EngineError>;

    /// Remove any value stored at `key`.
    ///
    /// Returns `Ok(true)` if a value was removed, `Ok(false)` if the key did
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ReadOnly`] on a read-only transaction, or an
    /// error if the delete fails.
    fn delete(&mut self, key: &[u8]) -> Result<bool, EngineError>;

    /// Create a cursor over the keyspace, unpositioned until the first seek.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor cannot be created.
    fn cursor(&self) -> Result<Self::Cursor<'_>, EngineError>;

    /// Commit the transaction.
    ///
    /// For a read-only transaction this releases the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Transaction`] if the commit fails. A failed
    /// commit leaves none of the transaction's writes visible.
    fn commit(self) -> Result<(), EngineError>;

    /// Roll back the transaction, discarding all staged changes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Transaction`] if the rollback fails.
    fn rollback(self) -> Result<(), EngineError>;

    /// Whether this is a read-only transaction.
    fn is_read_only(&self) -> bool;
}

/// A forward-only cursor over the engine's ordered keyspace.
pub trait KvCursor {
    /// Position the cursor at the first entry with key >= `key`.
    ///
    /// Returns that entry, or `None` if no such key exists.
    fn seek(&mut self, key: &[u8]) -> CursorResult;

    /// Advance to the next entry.
    ///
    /// Returns the entry, or `None` once the keyspace is exhausted.
    fn next(&mut self) -> CursorResult;

    /// The entry at the current position, or `None` if the cursor is not
    /// positioned on one.
    fn current(&self) -> Option<(&[u8], &[u8])>;
}
