//! Order-preserving key encodings
//!
//! Every implementation must uphold the ordering invariant: for two keys
//! `a` and `b` of the same type, `encode(a) < encode(b)` as byte strings
//! exactly when `a < b` as typed values. The engine only sorts raw bytes,
//! so every range scan in the crate rides on this invariant.
//!
//! Encodings are also canonical (one typed value, one byte sequence), so
//! a key written once is found again by re-encoding the lookup key.

use super::DecodeError;

/// A typed key with a canonical, order-preserving byte encoding
pub trait StoreKey: Sized {
    /// Append the canonical encoding of `self` to `out`
    fn encode_key(&self, out: &mut Vec<u8>);

    /// Decode a key from exactly `bytes`
    ///
    /// The slice is the whole payload; leftover bytes are an error.
    fn decode_key(bytes: &[u8]) -> Result<Self, DecodeError>;
}

// Unsigned integers: big-endian bytes, so numeric order equals byte order.
macro_rules! impl_unsigned_key {
    ($($t:ty),* $(,)?) => {$(
        impl StoreKey for $t {
            fn encode_key(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_be_bytes());
            }

            fn decode_key(bytes: &[u8]) -> Result<Self, DecodeError> {
                let arr: [u8; std::mem::size_of::<$t>()] =
                    bytes.try_into().map_err(|_| DecodeError::Length {
                        expected: std::mem::size_of::<$t>(),
                        found: bytes.len(),
                    })?;
                Ok(<$t>::from_be_bytes(arr))
            }
        }
    )*};
}

impl_unsigned_key!(u8, u16, u32, u64);

// Signed integers: big-endian with the sign bit flipped, so negative
// values sort below positive ones under unsigned byte comparison.
macro_rules! impl_signed_key {
    ($(($t:ty, $u:ty)),* $(,)?) => {$(
        impl StoreKey for $t {
            fn encode_key(&self, out: &mut Vec<u8>) {
                let flipped = (*self as $u) ^ (1 << (<$u>::BITS - 1));
                out.extend_from_slice(&flipped.to_be_bytes());
            }

            fn decode_key(bytes: &[u8]) -> Result<Self, DecodeError> {
                let arr: [u8; std::mem::size_of::<$t>()] =
                    bytes.try_into().map_err(|_| DecodeError::Length {
                        expected: std::mem::size_of::<$t>(),
                        found: bytes.len(),
                    })?;
                let flipped = <$u>::from_be_bytes(arr) ^ (1 << (<$u>::BITS - 1));
                Ok(flipped as $t)
            }
        }
    )*};
}

impl_signed_key!((i32, u32), (i64, u64));

/// Raw UTF-8 bytes; byte order equals Unicode scalar order.
///
/// A string consumes the whole payload, so it can only be the last (or
/// only) field of a composite key.
impl StoreKey for String {
    fn encode_key(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    fn decode_key(bytes: &[u8]) -> Result<Self, DecodeError> {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::Utf8)
    }
}

/// Raw bytes, ordered as the engine orders them. Consumes the whole
/// payload, like [`String`].
impl StoreKey for Vec<u8> {
    fn encode_key(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }

    fn decode_key(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(bytes.to_vec())
    }
}

/// Fixed-width byte array (hashes, identifiers); ordered bytewise.
impl<const N: usize> StoreKey for [u8; N] {
    fn encode_key(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }

    fn decode_key(bytes: &[u8]) -> Result<Self, DecodeError> {
        bytes.try_into().map_err(|_| DecodeError::Length {
            expected: N,
            found: bytes.len(),
        })
    }
}

/// Tag byte followed by the inner key: keyspaces partition by tag first,
/// then by inner order, which is what prefix-partitioned schemas want.
///
/// Tag `0x00` is reserved for the store's internal bookkeeping entries;
/// application tags start at `0x01`.
impl<K: StoreKey> StoreKey for (u8, K) {
    fn encode_key(&self, out: &mut Vec<u8>) {
        out.push(self.0);
        self.1.encode_key(out);
    }

    fn decode_key(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (&tag, rest) = bytes.split_first().ok_or(DecodeError::Truncated)?;
        Ok((tag, K::decode_key(rest)?))
    }
}
