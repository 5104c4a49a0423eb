//! Value obfuscation
//!
//! Stored values can be XOR-masked with a per-store key so the engine's
//! raw files do not contain recognizable application bytes. This is
//! obfuscation, not encryption: the key lives in the same engine
//! namespace under a reserved sentinel key, and XOR is trivially
//! reversible.
//!
//! The key is applied to values only. XOR-ing keys would scramble the
//! engine's byte ordering and break every lookup and range scan.

use rand::RngCore;

use crate::error::StoreError;

/// Length of the obfuscation key (in bytes)
pub const OBFUSCATE_KEY_LEN: usize = 16;

/// Engine key under which the obfuscation key persists
///
/// The `0x00` lead byte keeps it outside every application tag range;
/// typed iteration skips it.
pub(crate) const OBFUSCATE_SENTINEL: &[u8] = b"\x00obfuscate_key";

/// Per-store XOR key for value obfuscation
///
/// All-zero means disabled: XOR with zeros is the identity, so every code
/// path applies the key unconditionally instead of branching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscationKey([u8; OBFUSCATE_KEY_LEN]);

impl ObfuscationKey {
    /// Generate a fresh random key
    ///
    /// Only meaningful on a fresh store; `thread_rng` is a CSPRNG.
    pub fn random() -> Self {
        let mut bytes = [0u8; OBFUSCATE_KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// The all-zero key: XOR becomes a no-op
    pub fn disabled() -> Self {
        Self([0u8; OBFUSCATE_KEY_LEN])
    }

    /// Reconstruct a key from persisted bytes
    ///
    /// The engine hands stored bytes back verbatim; a length other than
    /// [`OBFUSCATE_KEY_LEN`] means the sentinel entry was written by
    /// something else, rejected here at the store boundary.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let bytes: [u8; OBFUSCATE_KEY_LEN] = bytes.try_into().map_err(|_| {
            StoreError::Validation(format!(
                "obfuscation key has unexpected length: expected {}, found {}",
                OBFUSCATE_KEY_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// True when the key is all zeros (obfuscation disabled)
    pub fn is_disabled(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Raw key bytes, for persistence under the sentinel
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// XOR `data` with the key in place, cycling the key as needed
    ///
    /// Self-inverse: applying twice restores the original bytes, so the
    /// same call obfuscates on write and deobfuscates on read.
    pub fn apply(&self, data: &mut [u8]) {
        for (i, byte) in data.iter_mut().enumerate() {
            *byte ^= self.0[i % OBFUSCATE_KEY_LEN];
        }
    }
}
