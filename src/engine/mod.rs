//! Engine abstraction
//!
//! The storage engine is an external collaborator: an ordered byte-key
//! space with point reads, atomic multi-entry writes, forward scans, and
//! coarse maintenance hooks. This module pins down exactly the surface
//! the typed layer needs, so backends stay swappable and tests can
//! inject failures.
//!
//! ## Contract
//! - Keys are arbitrary byte strings stored in lexicographic order.
//! - `apply` is atomic: all operations become visible together or not at
//!   all.
//! - `durable = true` blocks until the write is stable on its medium;
//!   otherwise the call may return once the engine's in-memory/log state
//!   holds the write.
//! - Scans yield entries in ascending key order, starting at the first
//!   key `>=` the requested start.

mod sled_backend;

pub use sled_backend::SledEngine;

use thiserror::Error;

/// An engine-level failure (I/O, corruption, environment)
///
/// Not-found is never an engine error; absent keys read as `Ok(None)`.
/// Callers treat these as fatal for the operation; there is no retry
/// policy at this layer.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EngineError(String);

impl EngineError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// A raw key/value entry yielded by a scan
pub type RawEntry = (Vec<u8>, Vec<u8>);

/// One encoded operation inside an atomic batch
#[derive(Debug, Clone)]
pub enum EngineOp {
    /// Insert or overwrite `key` with `value`
    Put { key: Vec<u8>, value: Vec<u8> },

    /// Remove `key` if present
    Delete { key: Vec<u8> },
}

/// The ordered byte-oriented storage engine this layer wraps
pub trait Engine: Send + Sync {
    /// Point lookup; `Ok(None)` when the key is absent
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError>;

    /// Atomically apply a group of operations, in order
    ///
    /// When `durable`, do not return until the write is crash-stable.
    fn apply(&self, ops: &[EngineOp], durable: bool) -> Result<(), EngineError>;

    /// Forward scan in ascending key order
    ///
    /// `start = None` scans from the smallest key; otherwise from the
    /// first key `>=` start.
    fn scan(
        &self,
        start: Option<&[u8]>,
    ) -> Box<dyn Iterator<Item = Result<RawEntry, EngineError>> + '_>;

    /// Approximate total size of entries in `[begin, end)`
    fn approximate_size(&self, begin: &[u8], end: &[u8]) -> Result<u64, EngineError>;

    /// Best-effort compaction of `[begin, end)`
    fn compact_range(&self, begin: &[u8], end: &[u8]) -> Result<(), EngineError>;

    /// Force buffered writes to stable storage
    fn flush(&self) -> Result<(), EngineError>;
}
