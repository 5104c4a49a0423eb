//! Typed value serialization
//!
//! Values round-trip through serde with deterministic bincode options:
//! fixed-width integers, big-endian, trailing bytes rejected. Determinism
//! matters even for values because obfuscation XORs the exact byte
//! sequence; ordering does not, so any canonical serde encoding works.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DecodeError, EncodeError, PREALLOC_VALUE_SIZE};

/// Deterministic bincode options shared by encode and decode
fn bincode_options() -> impl Options {
    bincode::options()
        .with_fixint_encoding()
        .with_big_endian()
        .reject_trailing_bytes()
}

/// A typed value storable through the layer
///
/// Blanket-implemented for every `Serialize + DeserializeOwned` type, so
/// application value types only need the serde derives.
pub trait StoreValue: Sized {
    /// Serialize into canonical payload bytes
    fn encode_value(&self) -> Result<Vec<u8>, EncodeError>;

    /// Deserialize from exactly `bytes`; trailing bytes are an error
    fn decode_value(bytes: &[u8]) -> Result<Self, DecodeError>;
}

impl<T> StoreValue for T
where
    T: Serialize + DeserializeOwned,
{
    fn encode_value(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(PREALLOC_VALUE_SIZE);
        bincode_options()
            .serialize_into(&mut out, self)
            .map_err(|e| EncodeError(e.to_string()))?;
        Ok(out)
    }

    fn decode_value(bytes: &[u8]) -> Result<Self, DecodeError> {
        bincode_options()
            .deserialize(bytes)
            .map_err(|e| DecodeError::Value(e.to_string()))
    }
}
