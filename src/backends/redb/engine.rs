//! Redb engine implementation.
//!
//! This module provides the [`RedbEngine`] type which implements the
//! [`KvEngine`] trait using the Redb embedded database.

use std::path::Path;

use redb::{Database, TableDefinition};

use crate::engine::{EngineError, EngineResult, KvEngine};

use super::transaction::RedbTransaction;

/// The physical table holding every key-value pair in the keyspace.
pub(super) const DATA_TABLE: TableDefinition<'static, &[u8], &[u8]> =
    TableDefinition::new("strata_data");

/// Tuning options for the Redb engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedbConfig {
    /// Page-cache budget in bytes; Redb picks its own default when unset.
    pub cache_size: Option<usize>,
}

impl RedbConfig {
    /// A configuration with every option left at the engine default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the page cache at `size` bytes.
    #[must_use]
    pub const fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }
}

/// An embedded engine backed by Redb.
///
/// Redb is a pure-Rust embedded database providing ACID transactions over an
/// ordered key-value space, which is exactly the contract [`KvEngine`] asks
/// for.
pub struct RedbEngine {
    /// Handle to the underlying database file (or in-memory backend).
    db: Database,
}

impl RedbEngine {
    /// Open or create a database at the given path with default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Open`] if the database cannot be opened or
    /// created.
    pub fn open(path: impl AsRef<Path>) -> EngineResult<Self> {
        Self::open_with_config(path, RedbConfig::default())
    }

    /// Open or create a database at the given path, applying `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Open`] if the database cannot be opened or
    /// created.
    pub fn open_with_config(path: impl AsRef<Path>, config: RedbConfig) -> EngineResult<Self> {
        let mut builder = Database::builder();
        if let Some(cache_size) = config.cache_size {
            builder.set_cache_size(cache_size);
        }

        builder
            .create(path.as_ref())
            .map(|db| Self { db })
            .map_err(|e| EngineError::Open(e.to_string()))
    }

    /// Create an engine with no backing file; contents vanish on drop.
    ///
    /// Intended for tests and benchmarks.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Open`] if the backend cannot be created.
    pub fn in_memory() -> EngineResult<Self> {
        Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map(|db| Self { db })
            .map_err(|e| EngineError::Open(e.to_string()))
    }
}

impl KvEngine for RedbEngine {
    type Txn<'a>
        = RedbTransaction
    where
        Self: 'a;

    fn begin_read(&self) -> Result<Self::Txn<'_>, EngineError> {
        let tx = self.db.begin_read().map_err(|e| EngineError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::new_read(tx))
    }

    fn begin_write(&self) -> Result<Self::Txn<'_>, EngineError> {
        let tx = self.db.begin_write().map_err(|e| EngineError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::new_write(tx))
    }
}
