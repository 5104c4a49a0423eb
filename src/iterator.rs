//! Typed iteration
//!
//! A cursor over the engine's sorted keyspace that decodes typed keys and
//! values on demand and strips value obfuscation. The iterator starts
//! unpositioned; `seek_to_first` or `seek` position it and `next`
//! advances it.
//!
//! ## States
//!
//! ```text
//! Unpositioned ──seek / seek_to_first──▶ Positioned ──next──▶ Positioned
//!                                            │                    │
//!                                            └──── next (end) ────┴──▶ Exhausted
//! ```
//!
//! `next` and the getters require a positioned iterator and return
//! [`StoreError::InvalidIterator`] otherwise; `valid` reports the state.

use crate::codec::{encode_key, StoreKey, StoreValue};
use crate::engine::{EngineError, RawEntry};
use crate::error::{Result, StoreError};
use crate::obfuscate::OBFUSCATE_SENTINEL;
use crate::store::Store;

type RawScan<'a> = Box<dyn Iterator<Item = std::result::Result<RawEntry, EngineError>> + 'a>;

/// Cursor over the typed keyspace of a [`Store`]
///
/// Holds a back-reference to the store that created it and cannot outlive
/// it. Entries reflect the keyspace as of the last seek, to the extent
/// the engine guarantees scan stability.
pub struct StoreIterator<'a> {
    store: &'a Store,
    scan: Option<RawScan<'a>>,
    current: Option<RawEntry>,
}

impl<'a> StoreIterator<'a> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Self {
            store,
            scan: None,
            current: None,
        }
    }

    /// Position at the smallest key in the store
    ///
    /// Exhausted immediately if the store holds no application entries.
    pub fn seek_to_first(&mut self) -> Result<()> {
        self.scan = Some(self.store.engine().scan(None));
        self.advance()
    }

    /// Position at the smallest key `>=` `key`
    pub fn seek<K: StoreKey>(&mut self, key: &K) -> Result<()> {
        let encoded = encode_key(key);
        self.scan = Some(self.store.engine().scan(Some(&encoded)));
        self.advance()
    }

    /// Advance to the next entry in key order
    pub fn next(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Err(StoreError::InvalidIterator);
        }
        self.advance()
    }

    /// True while the iterator is positioned on an entry
    pub fn valid(&self) -> bool {
        self.current.is_some()
    }

    /// Decode the current entry's key
    ///
    /// Decodes on every call; nothing is cached across calls.
    pub fn key<K: StoreKey>(&self) -> Result<K> {
        let (key, _) = self.current()?;
        Ok(K::decode_key(key)?)
    }

    /// Decode the current entry's value, removing obfuscation first
    pub fn value<V: StoreValue>(&self) -> Result<V> {
        let (_, value) = self.current()?;
        let mut plain = value.to_vec();
        self.store.obfuscation_key().apply(&mut plain);
        Ok(V::decode_value(&plain)?)
    }

    /// Byte length of the current entry's stored value
    ///
    /// The raw, still-obfuscated length; useful for statistics without
    /// paying the decode cost.
    pub fn value_size(&self) -> Result<usize> {
        let (_, value) = self.current()?;
        Ok(value.len())
    }

    fn current(&self) -> Result<(&[u8], &[u8])> {
        self.current
            .as_ref()
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
            .ok_or(StoreError::InvalidIterator)
    }

    /// Pull from the raw scan until a non-reserved entry or exhaustion
    fn advance(&mut self) -> Result<()> {
        let scan = self.scan.as_mut().ok_or(StoreError::InvalidIterator)?;
        loop {
            match scan.next() {
                None => {
                    self.current = None;
                    return Ok(());
                }
                Some(Err(e)) => {
                    self.current = None;
                    tracing::error!("engine scan failure: {e}");
                    return Err(e.into());
                }
                Some(Ok((key, value))) => {
                    // The reserved sentinel never reaches the typed surface.
                    if key == OBFUSCATE_SENTINEL {
                        continue;
                    }
                    self.current = Some((key, value));
                    return Ok(());
                }
            }
        }
    }
}
