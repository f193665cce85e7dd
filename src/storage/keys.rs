//! Column-family key encoding.
//!
//! The engine exposes one ordered byte keyspace, so logical column families
//! are carried in the keys themselves: a family prefix and a separator byte
//! in front of the logical key. Lexicographic order of physical keys then
//! matches the logical key order within a family, and distinct families
//! occupy disjoint, contiguous ranges of the keyspace.

/// Separator byte between the column-family name and the logical key.
///
/// Column-family names must not contain this byte.
pub const KEY_SEPARATOR: u8 = 0x00;

/// Encode a column family and logical key into a physical key.
///
/// The format is: `<cf bytes><separator><key bytes>`.
pub fn encode_cf_key(cf: &str, key: &[u8]) -> Vec<u8> {
    debug_assert!(
        !cf.as_bytes().contains(&KEY_SEPARATOR),
        "column-family name contains the separator byte"
    );
    let mut encoded = Vec::with_capacity(cf.len() + 1 + key.len());
    encoded.extend_from_slice(cf.as_bytes());
    encoded.push(KEY_SEPARATOR);
    encoded.extend_from_slice(key);
    encoded
}

/// Decode a physical key into its column family and logical key.
///
/// Returns `None` if the key is malformed (missing separator or non-UTF-8
/// family name); callers treat that as keyspace corruption.
pub fn decode_cf_key(encoded: &[u8]) -> Option<(&str, &[u8])> {
    let sep_pos = encoded.iter().position(|&b| b == KEY_SEPARATOR)?;
    let cf = std::str::from_utf8(&encoded[..sep_pos]).ok()?;
    let key = &encoded[sep_pos + 1..];
    Some((cf, key))
}

/// The first physical key belonging to a column family.
pub fn cf_start_key(cf: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(cf.len() + 1);
    key.extend_from_slice(cf.as_bytes());
    key.push(KEY_SEPARATOR);
    key
}

/// The first physical key past a column family's range.
pub fn cf_end_key(cf: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(cf.len() + 1);
    key.extend_from_slice(cf.as_bytes());
    key.push(KEY_SEPARATOR + 1);
    key
}
