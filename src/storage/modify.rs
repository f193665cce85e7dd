//! Pending write operations.

use serde::{Deserialize, Serialize};

/// One pending write operation within a batch.
///
/// A batch is an ordered `Vec<Modify>` applied in order as one atomic unit.
/// The type is a closed sum so the write path dispatches over exactly these
/// two shapes, and it owns its buffers so batches are `'static` and
/// serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modify {
    /// Upsert `value` at `(cf, key)`.
    Put {
        /// Target column family.
        cf: String,
        /// Logical key.
        key: Vec<u8>,
        /// Value to store.
        value: Vec<u8>,
    },
    /// Remove any value at `(cf, key)`.
    Delete {
        /// Target column family.
        cf: String,
        /// Logical key.
        key: Vec<u8>,
    },
}

impl Modify {
    /// The column family this operation targets.
    pub fn cf(&self) -> &str {
        match self {
            Self::Put { cf, .. } | Self::Delete { cf, .. } => cf,
        }
    }

    /// The logical key this operation targets.
    pub fn key(&self) -> &[u8] {
        match self {
            Self::Put { key, .. } | Self::Delete { key, .. } => key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_cover_both_variants() {
        let put = Modify::Put { cf: "a".to_string(), key: b"k".to_vec(), value: b"v".to_vec() };
        assert_eq!(put.cf(), "a");
        assert_eq!(put.key(), b"k");

        let delete = Modify::Delete { cf: "b".to_string(), key: b"k2".to_vec() };
        assert_eq!(delete.cf(), "b");
        assert_eq!(delete.key(), b"k2");
    }
}
