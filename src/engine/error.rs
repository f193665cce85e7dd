//! Engine error types.

use thiserror::Error;

/// Errors that can occur inside an embedded engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be opened or created.
    #[error("failed to open engine: {0}")]
    Open(String),

    /// A transaction could not be started, committed, or rolled back.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// A write operation was attempted on a read-only transaction.
    #[error("transaction is read-only")]
    ReadOnly,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal engine failure.
    #[error("engine error: {0}")]
    Internal(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
