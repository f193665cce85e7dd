//! Redb backend.
//!
//! An implementation of the engine contract on top of the Redb embedded
//! database.

mod engine;
mod transaction;

pub use engine::{RedbConfig, RedbEngine};
pub use transaction::{RedbCursor, RedbTransaction};
