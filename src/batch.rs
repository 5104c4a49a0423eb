//! Write batches
//!
//! A batch accumulates encoded put/delete operations together with an
//! estimate of the bytes the engine will write for them, so callers can
//! commit at a size threshold instead of letting the batch grow without
//! bound. Values are obfuscated as they enter the batch; keys never are.
//!
//! ## Size Estimate
//!
//! The estimate models the classic write-batch record framing:
//!
//! ```text
//! ┌─────────┬────────────┬─────────┬────────────┬─────────┐
//! │ tag (1) │ key varint │   key   │ val varint │  value  │
//! └─────────┴────────────┴─────────┴────────────┴─────────┘
//! ```
//!
//! A varint length is 1 byte up to 127 and 2 bytes up to 16383. The
//! estimate assumes every entry stays under 16 KiB; larger entries are
//! under-counted by the extra varint bytes. Backends differ in their
//! exact on-disk framing, so treat this as an approximation for flush
//! decisions, never an exact byte count.

use crate::codec::{encode_key, StoreKey, StoreValue};
use crate::engine::EngineOp;
use crate::error::Result;
use crate::store::Store;

/// Batch of changes queued to be committed to a [`Store`]
///
/// Tied to the store that created it (the obfuscation key comes from
/// there) and mutated by a single owner at a time; independent batches
/// can be built and committed concurrently.
pub struct WriteBatch<'a> {
    store: &'a Store,
    ops: Vec<EngineOp>,
    size_estimate: usize,
}

impl<'a> WriteBatch<'a> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Self {
            store,
            ops: Vec::new(),
            size_estimate: 0,
        }
    }

    /// Queue an insert-or-overwrite of `key` with `value`
    ///
    /// Later operations on the same key win at commit time.
    pub fn put<K: StoreKey, V: StoreValue>(&mut self, key: &K, value: &V) -> Result<()> {
        let key_bytes = encode_key(key);
        let mut value_bytes = value.encode_value()?;
        self.store.obfuscation_key().apply(&mut value_bytes);

        // Modeled framing: tag byte + key varint + key + value varint +
        // value. Varints are 1 byte up to 127, 2 up to 16383; entries of
        // 16 KiB and above are under-counted.
        self.size_estimate += 3
            + usize::from(key_bytes.len() > 127)
            + key_bytes.len()
            + usize::from(value_bytes.len() > 127)
            + value_bytes.len();

        self.ops.push(EngineOp::Put {
            key: key_bytes,
            value: value_bytes,
        });
        Ok(())
    }

    /// Queue a delete of `key`
    pub fn delete<K: StoreKey>(&mut self, key: &K) {
        let key_bytes = encode_key(key);

        // One fewer framed field than a put: tag byte + key varint + key.
        self.size_estimate += 2 + usize::from(key_bytes.len() > 127) + key_bytes.len();

        self.ops.push(EngineOp::Delete { key: key_bytes });
    }

    /// Drop all queued operations and reset the size estimate to zero
    ///
    /// The owner calls this after a successful commit; a failed commit
    /// leaves the batch intact for retry or inspection.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.size_estimate = 0;
    }

    /// Estimated engine bytes for the queued operations
    ///
    /// Non-decreasing between `clear` calls; strictly increases on every
    /// `put` or `delete`.
    pub fn size_estimate(&self) -> usize {
        self.size_estimate
    }

    /// Number of queued operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when no operations are queued
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The encoded operations, in apply order
    pub(crate) fn ops(&self) -> &[EngineOp] {
        &self.ops
    }
}
