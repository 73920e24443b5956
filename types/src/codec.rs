//! Canonical bincode configuration shared by every wire type in this crate.
//!
//! Fixed-width little-endian integers, which is the layout `bincode::serialize`
//! produces. Decoding additionally refuses input left over after the value and
//! caps the length it will allocate for.

use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};

/// Upper bound on the size of any decoded value.
pub const MAX_DECODE_LEN: u64 = 1 << 20;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
}

pub(crate) fn encode<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    options()
        .serialize(value)
        .expect("in-memory values are always serializable")
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, bincode::Error> {
    options()
        .with_limit(MAX_DECODE_LEN)
        .reject_trailing_bytes()
        .deserialize(bytes)
}
