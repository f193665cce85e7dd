//! Transactions over the Redb engine.
//!
//! This module provides the [`RedbTransaction`] type which implements the
//! [`KvTransaction`] trait for both read-only and read-write transactions,
//! and a batched-streaming cursor over the keyspace.
//!
//! # Memory-Bounded Cursors
//!
//! The cursor does not materialize the keyspace. It loads entries in fixed
//! batches and fetches the next batch on demand, keyed off the last physical
//! key seen, so a scan over a large keyspace holds at most one batch in
//! memory.

use std::ops::Bound;

use redb::{ReadTransaction, ReadableTable, WriteTransaction};

use crate::engine::{CursorResult, EngineError, EngineResult, KeyValue, KvCursor, KvTransaction};

use super::engine::DATA_TABLE;

/// Number of entries fetched per cursor batch.
const CURSOR_BATCH_SIZE: usize = 256;

/// A transaction over the Redb engine.
///
/// Wraps both read-only and read-write Redb transactions behind the
/// [`KvTransaction`] trait. Boxing the write variant would add indirection
/// on every operation, so the size difference between the variants is
/// accepted.
#[allow(clippy::large_enum_variant)]
pub enum RedbTransaction {
    /// Snapshot reads only.
    Read(ReadTransaction),
    /// Reads plus staged writes.
    Write(WriteTransaction),
}

impl RedbTransaction {
    /// Wrap a Redb read transaction.
    pub const fn new_read(tx: ReadTransaction) -> Self {
        Self::Read(tx)
    }

    /// Wrap a Redb write transaction.
    pub const fn new_write(tx: WriteTransaction) -> Self {
        Self::Write(tx)
    }

    /// Fetch up to `batch_size` entries starting from `start`.
    ///
    /// A missing data table means an empty keyspace, not an error.
    fn fetch_batch(&self, start: Bound<&[u8]>, batch_size: usize) -> EngineResult<Vec<KeyValue>> {
        let mut entries = Vec::new();

        match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => {
                    let range = t
                        .range::<&[u8]>((start, Bound::Unbounded))
                        .map_err(|e| EngineError::Internal(e.to_string()))?;
                    for result in range {
                        if entries.len() >= batch_size {
                            break;
                        }
                        let (k, v) =
                            result.map_err(|e| EngineError::Internal(e.to_string()))?;
                        entries.push((k.value().to_vec(), v.value().to_vec()));
                    }
                    Ok(entries)
                }
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(entries),
                Err(e) => Err(EngineError::Internal(e.to_string())),
            },
            Self::Write(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => {
                    let range = t
                        .range::<&[u8]>((start, Bound::Unbounded))
                        .map_err(|e| EngineError::Internal(e.to_string()))?;
                    for result in range {
                        if entries.len() >= batch_size {
                            break;
                        }
                        let (k, v) =
                            result.map_err(|e| EngineError::Internal(e.to_string()))?;
                        entries.push((k.value().to_vec(), v.value().to_vec()));
                    }
                    Ok(entries)
                }
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(entries),
                Err(e) => Err(EngineError::Internal(e.to_string())),
            },
        }
    }
}

impl KvTransaction for RedbTransaction {
    type Cursor<'a>
        = RedbCursor<'a>
    where
        Self: 'a;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError> {
        match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => match t.get(key) {
                    Ok(Some(value)) => Ok(Some(value.value().to_vec())),
                    Ok(None) => Ok(None),
                    Err(e) => Err(EngineError::Internal(e.to_string())),
                },
                // No data table means no data, which is not an error.
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
                Err(e) => Err(EngineError::Internal(e.to_string())),
            },
            Self::Write(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => match t.get(key) {
                    Ok(Some(value)) => Ok(Some(value.value().to_vec())),
                    Ok(None) => Ok(None),
                    Err(e) => Err(EngineError::Internal(e.to_string())),
                },
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
                Err(e) => Err(EngineError::Internal(e.to_string())),
            },
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), EngineError> {
        match self {
            Self::Read(_) => Err(EngineError::ReadOnly),
            Self::Write(tx) => {
                let mut t =
                    tx.open_table(DATA_TABLE).map_err(|e| EngineError::Internal(e.to_string()))?;
                t.insert(key, value).map_err(|e| EngineError::Internal(e.to_string()))?;
                Ok(())
            }
        }
    }

    fn delete(&mut self, key: &[u8]) -> Result<bool, EngineError> {
        match self {
            Self::Read(_) => Err(EngineError::ReadOnly),
            Self::Write(tx) => match tx.open_table(DATA_TABLE) {
                Ok(mut t) => match t.remove(key) {
                    Ok(Some(_)) => Ok(true),
                    Ok(None) => Ok(false),
                    Err(e) => Err(EngineError::Internal(e.to_string())),
                },
                // Nothing was ever written, so the key cannot exist.
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(false),
                Err(e) => Err(EngineError::Internal(e.to_string())),
            },
        }
    }

    fn cursor(&self) -> Result<Self::Cursor<'_>, EngineError> {
        Ok(RedbCursor::new(self, CURSOR_BATCH_SIZE))
    }

    fn commit(self) -> Result<(), EngineError> {
        match self {
            Self::Read(tx) => tx.close().map_err(|e| EngineError::Transaction(e.to_string())),
            Self::Write(tx) => tx.commit().map_err(|e| EngineError::Transaction(e.to_string())),
        }
    }

    fn rollback(self) -> Result<(), EngineError> {
        match self {
            Self::Read(tx) => tx.close().map_err(|e| EngineError::Transaction(e.to_string())),
            Self::Write(tx) => {
                tx.abort().map_err(|e| EngineError::Transaction(e.to_string()))
            }
        }
    }

    fn is_read_only(&self) -> bool {
        matches!(self, Self::Read(_))
    }
}

/// A forward-only, memory-bounded cursor over the Redb keyspace.
///
/// At any time the cursor holds at most [`CURSOR_BATCH_SIZE`] entries, so
/// iterating a keyspace of a million entries uses roughly the same memory as
/// one of a hundred.
pub struct RedbCursor<'a> {
    /// The transaction batches are fetched through.
    txn: &'a RedbTransaction,
    /// The current batch of entries.
    batch: Vec<KeyValue>,
    /// Position within the current batch, `None` when unpositioned or
    /// exhausted.
    pos: Option<usize>,
    /// Whether a further batch may exist past the current one.
    has_more: bool,
    /// Entries fetched per refill.
    batch_size: usize,
}

impl<'a> RedbCursor<'a> {
    fn new(txn: &'a RedbTransaction, batch_size: usize) -> Self {
        Self { txn, batch: Vec::new(), pos: None, has_more: false, batch_size }
    }

    fn entry_at_pos(&self) -> Option<KeyValue> {
        self.pos.and_then(|p| self.batch.get(p)).cloned()
    }
}

impl KvCursor for RedbCursor<'_> {
    fn seek(&mut self, key: &[u8]) -> CursorResult {
        self.batch = self.txn.fetch_batch(Bound::Included(key), self.batch_size)?;
        self.has_more = self.batch.len() == self.batch_size;
        self.pos = if self.batch.is_empty() { None } else { Some(0) };
        Ok(self.entry_at_pos())
    }

    fn next(&mut self) -> CursorResult {
        let Some(pos) = self.pos else {
            return Ok(None);
        };

        if pos + 1 < self.batch.len() {
            self.pos = Some(pos + 1);
            return Ok(self.entry_at_pos());
        }

        if !self.has_more {
            self.pos = None;
            return Ok(None);
        }

        // Continue after the last key of the exhausted batch.
        let last = match self.batch.last() {
            Some((k, _)) => k.clone(),
            None => {
                self.pos = None;
                return Ok(None);
            }
        };
        self.batch = self.txn.fetch_batch(Bound::Excluded(last.as_slice()), self.batch_size)?;
        self.has_more = self.batch.len() == self.batch_size;
        self.pos = if self.batch.is_empty() { None } else { Some(0) };
        Ok(self.entry_at_pos())
    }

    fn current(&self) -> Option<(&[u8], &[u8])> {
        self.pos.and_then(|p| self.batch.get(p)).map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::redb::RedbEngine;
    use crate::engine::KvEngine;

    fn populated_engine() -> RedbEngine {
        let engine = RedbEngine::in_memory().expect("failed to create engine");
        {
            let mut tx = engine.begin_write().expect("failed to begin write");
            for key in [b"a", b"c", b"e"] {
                tx.set(key, b"v").expect("failed to set");
            }
            tx.commit().expect("failed to commit");
        }
        engine
    }

    #[test]
    fn test_seek_positions_at_first_ge_key() {
        let engine = populated_engine();
        let tx = engine.begin_read().expect("failed to begin read");
        let mut cursor = tx.cursor().expect("failed to create cursor");

        let hit = cursor.seek(b"b").expect("failed to seek");
        assert_eq!(hit, Some((b"c".to_vec(), b"v".to_vec())));
        assert_eq!(cursor.current(), Some((b"c".as_slice(), b"v".as_slice())));
    }

    #[test]
    fn test_next_exhausts_keyspace() {
        let engine = populated_engine();
        let tx = engine.begin_read().expect("failed to begin read");
        let mut cursor = tx.cursor().expect("failed to create cursor");

        let mut seen = Vec::new();
        let mut entry = cursor.seek(b"").expect("failed to seek");
        while let Some((k, _)) = entry {
            seen.push(k);
            entry = cursor.next().expect("failed to advance");
        }
        assert_eq!(seen, vec![b"a".to_vec(), b"c".to_vec(), b"e".to_vec()]);

        // Exhausted cursors stay exhausted.
        assert_eq!(cursor.next().expect("failed to advance"), None);
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_seek_past_end() {
        let engine = populated_engine();
        let tx = engine.begin_read().expect("failed to begin read");
        let mut cursor = tx.cursor().expect("failed to create cursor");

        assert_eq!(cursor.seek(b"z").expect("failed to seek"), None);
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_read_transaction_rejects_writes() {
        let engine = RedbEngine::in_memory().expect("failed to create engine");
        let mut tx = engine.begin_read().expect("failed to begin read");

        assert!(matches!(tx.set(b"k", b"v"), Err(EngineError::ReadOnly)));
        assert!(matches!(tx.delete(b"k"), Err(EngineError::ReadOnly)));
    }

    #[test]
    fn test_rollback_discards_staged_writes() {
        let engine = populated_engine();

        {
            let mut tx = engine.begin_write().expect("failed to begin write");
            tx.set(b"b", b"staged").expect("failed to set");
            tx.delete(b"a").expect("failed to delete");
            tx.rollback().expect("failed to rollback");
        }

        let tx = engine.begin_read().expect("failed to begin read");
        assert_eq!(tx.get(b"b").expect("failed to get"), None);
        assert_eq!(tx.get(b"a").expect("failed to get"), Some(b"v".to_vec()));
    }

    #[test]
    fn test_drop_without_commit_rolls_back() {
        let engine = populated_engine();

        {
            let mut tx = engine.begin_write().expect("failed to begin write");
            tx.set(b"dropped", b"v").expect("failed to set");
        }

        let tx = engine.begin_read().expect("failed to begin read");
        assert_eq!(tx.get(b"dropped").expect("failed to get"), None);
    }

    #[test]
    fn test_batch_boundary_continuation() {
        let engine = RedbEngine::in_memory().expect("failed to create engine");
        {
            let mut tx = engine.begin_write().expect("failed to begin write");
            for i in 0..1000u32 {
                let key = format!("key:{i:05}");
                tx.set(key.as_bytes(), b"v").expect("failed to set");
            }
            tx.commit().expect("failed to commit");
        }

        let tx = engine.begin_read().expect("failed to begin read");
        let mut cursor = tx.cursor().expect("failed to create cursor");
        let mut count = 0u32;
        let mut entry = cursor.seek(b"").expect("failed to seek");
        while entry.is_some() {
            count += 1;
            entry = cursor.next().expect("failed to advance");
        }
        assert_eq!(count, 1000);
    }
}
