//! Raw command handlers.
//!
//! Each handler is a stateless translation step from a wire request to
//! storage calls and back into a response. Errors from the storage layer
//! propagate unchanged; the single exception is the not-found condition on
//! get, which becomes a response flag. Retry policy, timeouts, and
//! cancellation all belong to the layer above.

mod types;

use crate::error::Result;
use crate::storage::{CfIterator, Modify, Storage, StorageReader};

pub use types::{
    KvPair, RawDeleteRequest, RawDeleteResponse, RawGetRequest, RawGetResponse, RawPutRequest,
    RawPutResponse, RawScanRequest, RawScanResponse,
};

/// The raw command surface over a storage backend.
///
/// Holds the process-wide storage handle; handlers may run concurrently
/// from any number of threads.
pub struct CommandService<S> {
    storage: S,
}

impl<S: Storage> CommandService<S> {
    /// Create a service over the given storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Point lookup.
    ///
    /// The reader is released on every exit path, including the path where
    /// the lookup itself fails.
    ///
    /// # Errors
    ///
    /// Propagates storage errors unchanged. An absent key is not an error.
    pub fn raw_get(&self, req: RawGetRequest) -> Result<RawGetResponse> {
        let reader = self.storage.reader(&req.ctx)?;
        let lookup = reader.get_cf(&req.cf, &req.key);
        let closed = reader.close();

        let value = lookup?;
        closed?;

        // An empty stored value reports as not found, per the wire contract.
        let not_found = value.as_ref().map_or(true, |v| v.is_empty());
        Ok(RawGetResponse { value: value.unwrap_or_default(), not_found })
    }

    /// Point upsert, applied as a single-element atomic batch.
    ///
    /// # Errors
    ///
    /// Propagates storage errors unchanged.
    pub fn raw_put(&self, req: RawPutRequest) -> Result<RawPutResponse> {
        let batch = vec![Modify::Put { cf: req.cf, key: req.key, value: req.value }];
        self.storage.write(&req.ctx, batch)?;
        Ok(RawPutResponse {})
    }

    /// Point delete, applied as a single-element atomic batch.
    ///
    /// # Errors
    ///
    /// Propagates storage errors unchanged.
    pub fn raw_delete(&self, req: RawDeleteRequest) -> Result<RawDeleteResponse> {
        let batch = vec![Modify::Delete { cf: req.cf, key: req.key }];
        self.storage.write(&req.ctx, batch)?;
        Ok(RawDeleteResponse {})
    }

    /// Range scan: up to `limit` pairs in key order, starting at the first
    /// key >= `start_key` within the family.
    ///
    /// # Errors
    ///
    /// Propagates storage errors unchanged. A scan past the end of the
    /// family, or with a limit of zero, returns an empty response.
    pub fn raw_scan(&self, req: RawScanRequest) -> Result<RawScanResponse> {
        let reader = self.storage.reader(&req.ctx)?;
        let scanned = scan_cf(&reader, &req.cf, &req.start_key, req.limit);
        let closed = reader.close();

        let pairs = scanned?;
        closed?;

        Ok(RawScanResponse { pairs })
    }
}

/// Collect up to `limit` pairs from one family, starting at `start_key`.
fn scan_cf<R: StorageReader>(
    reader: &R,
    cf: &str,
    start_key: &[u8],
    limit: u32,
) -> Result<Vec<KvPair>> {
    let mut pairs = Vec::new();
    let mut iter = reader.iter_cf(cf)?;
    iter.seek(start_key)?;

    while iter.valid() && (pairs.len() as u32) < limit {
        if let Some((key, value)) = iter.item() {
            pairs.push(KvPair { key: key.to_vec(), value: value.to_vec() });
        }
        iter.next()?;
    }

    Ok(pairs)
}
