//! Typed key/value codecs
//!
//! Converts typed keys and values to and from the byte sequences the
//! engine stores. Keys use hand-written order-preserving encodings, so the
//! engine's native byte ordering is the application's typed ordering;
//! values go through serde with deterministic bincode options.
//!
//! The codec frames nothing: the engine's own record framing carries
//! lengths, so an encoded key or value is payload bytes only.

mod key;
mod value;

pub use key::StoreKey;
pub use value::StoreValue;

use thiserror::Error;

/// Buffer preallocation hint for encoded keys
pub(crate) const PREALLOC_KEY_SIZE: usize = 64;

/// Buffer preallocation hint for encoded values
pub(crate) const PREALLOC_VALUE_SIZE: usize = 1024;

/// Failure to decode stored bytes back into a typed key or value
///
/// Reads treat these as not-found rather than fatal: stale or foreign
/// bytes under a key must never take the store down.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unexpected encoded length: expected {expected}, found {found}")]
    Length { expected: usize, found: usize },

    #[error("truncated key bytes")]
    Truncated,

    #[error("key bytes are not valid UTF-8")]
    Utf8,

    #[error("malformed value: {0}")]
    Value(String),
}

/// Failure to serialize a typed value
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EncodeError(pub(crate) String);

/// Encode a key into a fresh buffer with the standard preallocation hint
pub(crate) fn encode_key<K: StoreKey>(key: &K) -> Vec<u8> {
    let mut out = Vec::with_capacity(PREALLOC_KEY_SIZE);
    key.encode_key(&mut out);
    out
}
