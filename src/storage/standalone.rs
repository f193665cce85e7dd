//! Single-node storage backend.
//!
//! [`StandaloneStorage`] implements the storage contract directly against
//! one embedded engine instance, with no peer coordination. Column families
//! are resolved through the key encoding in [`keys`](super::keys); the
//! engine itself only ever sees physical keys.

use tracing::{info, warn};

use crate::backends::{RedbConfig, RedbEngine};
use crate::config::Config;
use crate::engine::{KeyValue, KvCursor, KvEngine, KvTransaction};
use crate::error::{Error, Result};

use super::keys;
use super::{CfIterator, Modify, RequestContext, Storage, StorageReader};

/// File name of the engine database inside the configured data directory.
const DB_FILE_NAME: &str = "stratakv.redb";

/// A storage backend over exactly one embedded engine.
///
/// All data lives locally; the engine's transaction boundary is the
/// atomicity and isolation boundary. Conflicting concurrent writers may
/// fail and are not retried by this layer.
pub struct StandaloneStorage<E> {
    /// The process-wide engine handle.
    engine: E,
}

impl<E: KvEngine> StandaloneStorage<E> {
    /// Wrap an already-open engine.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }
}

impl StandaloneStorage<RedbEngine> {
    /// Open or create the engine inside the configured data directory.
    ///
    /// Failure here is a fatal startup condition: the caller gets the error
    /// rather than a degraded store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EngineUnavailable`] if the directory cannot be
    /// created or the engine cannot be opened.
    pub fn open(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.dir)
            .map_err(|e| Error::EngineUnavailable(e.into()))?;

        let mut redb_config = RedbConfig::new();
        if let Some(cache_size) = config.cache_size {
            redb_config = redb_config.cache_size(cache_size);
        }

        let path = config.dir.join(DB_FILE_NAME);
        let engine = RedbEngine::open_with_config(&path, redb_config)
            .map_err(Error::EngineUnavailable)?;

        info!(path = %path.display(), "opened standalone storage");
        Ok(Self::new(engine))
    }
}

impl<E: KvEngine> Storage for StandaloneStorage<E> {
    type Reader<'a>
        = StandaloneReader<E::Txn<'a>>
    where
        Self: 'a;

    fn reader(&self, _ctx: &RequestContext) -> Result<Self::Reader<'_>> {
        let txn = self.engine.begin_read().map_err(Error::EngineUnavailable)?;
        Ok(StandaloneReader { txn })
    }

    fn write(&self, _ctx: &RequestContext, batch: Vec<Modify>) -> Result<()> {
        let mut txn = self.engine.begin_write().map_err(Error::EngineUnavailable)?;

        for modify in &batch {
            let staged = match modify {
                Modify::Put { cf, key, value } => txn.set(&keys::encode_cf_key(cf, key), value),
                Modify::Delete { cf, key } => {
                    txn.delete(&keys::encode_cf_key(cf, key)).map(|_| ())
                }
            };
            if let Err(err) = staged {
                // Nothing staged so far may become visible.
                warn!(cf = modify.cf(), error = %err, "abandoning write batch");
                let _ = txn.rollback();
                return Err(Error::WriteFailed(err));
            }
        }

        txn.commit().map_err(Error::WriteFailed)
    }
}

/// A reader over one read-only engine transaction.
pub struct StandaloneReader<T> {
    txn: T,
}

impl<T: KvTransaction> StorageReader for StandaloneReader<T> {
    type Iter<'a>
        = CfIter<T::Cursor<'a>>
    where
        Self: 'a;

    fn get_cf(&self, cf: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.txn.get(&keys::encode_cf_key(cf, key))?)
    }

    fn iter_cf(&self, cf: &str) -> Result<Self::Iter<'_>> {
        Ok(CfIter::new(self.txn.cursor()?, cf))
    }

    fn close(self) -> Result<()> {
        // Committing a read-only transaction releases its snapshot.
        Ok(self.txn.commit()?)
    }
}

/// A forward iterator over one column family.
///
/// Wraps an engine cursor: seeks are translated through the key encoding,
/// and every physical entry is decoded so callers only ever see logical
/// keys. The iterator goes invalid as soon as the cursor leaves the
/// family's range.
pub struct CfIter<C> {
    cursor: C,
    cf: String,
    /// First physical key past the family's range.
    end: Vec<u8>,
    current: Option<KeyValue>,
}

impl<C: KvCursor> CfIter<C> {
    fn new(cursor: C, cf: &str) -> Self {
        Self { cursor, cf: cf.to_string(), end: keys::cf_end_key(cf), current: None }
    }

    /// Decode a physical entry, keeping it only while the cursor is inside
    /// the family's range.
    fn filter_entry(&self, entry: Option<KeyValue>) -> Result<Option<KeyValue>> {
        match entry {
            Some((physical, value)) if physical < self.end => {
                let (_, logical) = keys::decode_cf_key(&physical)
                    .ok_or_else(|| Error::CorruptKey(physical.clone()))?;
                Ok(Some((logical.to_vec(), value)))
            }
            _ => Ok(None),
        }
    }
}

impl<C: KvCursor> CfIterator for CfIter<C> {
    fn seek(&mut self, start_key: &[u8]) -> Result<()> {
        let target = keys::encode_cf_key(&self.cf, start_key);
        let entry = self.cursor.seek(&target)?;
        self.current = self.filter_entry(entry)?;
        Ok(())
    }

    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn item(&self) -> Option<(&[u8], &[u8])> {
        self.current.as_ref().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    fn next(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Ok(());
        }
        let entry = self.cursor.next()?;
        self.current = self.filter_entry(entry)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> StandaloneStorage<RedbEngine> {
        StandaloneStorage::new(RedbEngine::in_memory().expect("failed to create engine"))
    }

    fn put(cf: &str, key: &[u8], value: &[u8]) -> Modify {
        Modify::Put { cf: cf.to_string(), key: key.to_vec(), value: value.to_vec() }
    }

    #[test]
    fn test_iter_cf_stops_at_family_boundary() {
        let storage = store();
        let ctx = RequestContext::new();
        storage
            .write(&ctx, vec![put("a", b"k1", b"v1"), put("b", b"k1", b"v2")])
            .expect("failed to write");

        let reader = storage.reader(&ctx).expect("failed to acquire reader");
        {
            let mut iter = reader.iter_cf("a").expect("failed to create iterator");
            iter.seek(b"").expect("failed to seek");
            assert!(iter.valid());
            assert_eq!(iter.item(), Some((b"k1".as_slice(), b"v1".as_slice())));

            // Family "b" holds the next physical key; the iterator must not
            // cross into it.
            iter.next().expect("failed to advance");
            assert!(!iter.valid());
            assert_eq!(iter.item(), None);
        }
        reader.close().expect("failed to close reader");
    }

    #[test]
    fn test_write_applies_batch_in_order() {
        let storage = store();
        let ctx = RequestContext::new();

        // A put followed by a delete of the same key must net out to absent.
        storage
            .write(
                &ctx,
                vec![
                    put("c", b"k", b"v"),
                    Modify::Delete { cf: "c".to_string(), key: b"k".to_vec() },
                ],
            )
            .expect("failed to write");

        let reader = storage.reader(&ctx).expect("failed to acquire reader");
        assert_eq!(reader.get_cf("c", b"k").expect("failed to get"), None);
        reader.close().expect("failed to close reader");
    }
}
