//! Store façade
//!
//! Owns the engine handle and the per-store obfuscation key, and exposes
//! the typed surface: point reads and writes, batched atomic commits,
//! iteration, and the engine's maintenance hooks.
//!
//! ## Responsibilities
//! - Encode typed keys/values on the way in, decode on the way out
//! - Load or create the obfuscation key at open, before any other write
//! - Route writes through atomic engine batches with optional durability
//! - Surface engine failures as errors, absorb not-found as `None`

use crate::batch::WriteBatch;
use crate::codec::{encode_key, StoreKey, StoreValue};
use crate::config::StoreConfig;
use crate::engine::{Engine, EngineOp, SledEngine};
use crate::error::Result;
use crate::iterator::StoreIterator;
use crate::obfuscate::{ObfuscationKey, OBFUSCATE_SENTINEL};

/// Typed store over an embedded ordered key-value engine
///
/// Exactly one `Store` owns each open engine instance; dropping the store
/// releases the engine. All operations take `&self` and block until the
/// engine answers; there is no async boundary in this layer.
pub struct Store {
    engine: Box<dyn Engine>,
    obfuscate_key: ObfuscationKey,
}

impl Store {
    /// Open a store as described by `config`
    ///
    /// Wipes first if requested, then loads the persisted obfuscation key
    /// or creates one (random when `config.obfuscate`, all-zero
    /// otherwise).
    pub fn open(config: StoreConfig) -> Result<Self> {
        let engine = SledEngine::open(&config)?;
        let store = Self::with_engine(Box::new(engine), config.obfuscate)?;
        tracing::info!(
            obfuscated = !store.obfuscate_key.is_disabled(),
            "store opened"
        );
        Ok(store)
    }

    /// Open an ephemeral store, discarded when dropped
    pub fn open_temporary(obfuscate: bool) -> Result<Self> {
        let config = StoreConfig::builder()
            .in_memory()
            .obfuscate(obfuscate)
            .build();
        Self::open(config)
    }

    /// Wrap an already-open engine
    ///
    /// [`Store::open`] uses this internally; callers can supply
    /// alternative [`Engine`] backends the same way.
    pub fn with_engine(engine: Box<dyn Engine>, obfuscate: bool) -> Result<Self> {
        let obfuscate_key = match engine.get(OBFUSCATE_SENTINEL)? {
            Some(stored) => ObfuscationKey::from_bytes(&stored)?,
            None => {
                // Fresh store: persist the key durably before anything
                // else so a reopened handle sees the same masking.
                let key = if obfuscate {
                    ObfuscationKey::random()
                } else {
                    ObfuscationKey::disabled()
                };
                engine.apply(
                    &[EngineOp::Put {
                        key: OBFUSCATE_SENTINEL.to_vec(),
                        value: key.as_bytes().to_vec(),
                    }],
                    true,
                )?;
                tracing::debug!(obfuscated = obfuscate, "created obfuscation key");
                key
            }
        };
        Ok(Self {
            engine,
            obfuscate_key,
        })
    }

    // -------------------------------------------------------------------------
    // Point Operations
    // -------------------------------------------------------------------------

    /// Point lookup
    ///
    /// `Ok(None)` when the key is absent. Stored bytes that fail to decode
    /// also read as absent: entries written under an older or foreign
    /// format degrade to not-found instead of failing the caller.
    pub fn read<K: StoreKey, V: StoreValue>(&self, key: &K) -> Result<Option<V>> {
        let encoded = encode_key(key);
        let raw = match self.engine.get(&encoded) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("engine read failure: {e}");
                return Err(e.into());
            }
        };
        let Some(mut value) = raw else {
            return Ok(None);
        };
        self.obfuscate_key.apply(&mut value);
        match V::decode_value(&value) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(e) => {
                tracing::debug!("undecodable value treated as not-found: {e}");
                Ok(None)
            }
        }
    }

    /// Insert or overwrite one entry
    ///
    /// `durable` blocks until the write is crash-stable; otherwise the
    /// call returns once the engine's in-memory/log state holds it.
    pub fn write<K: StoreKey, V: StoreValue>(
        &self,
        key: &K,
        value: &V,
        durable: bool,
    ) -> Result<()> {
        let mut batch = self.batch();
        batch.put(key, value)?;
        self.commit(&batch, durable)
    }

    /// True when the key is present, without decoding its value
    pub fn exists<K: StoreKey>(&self, key: &K) -> Result<bool> {
        let encoded = encode_key(key);
        match self.engine.get(&encoded) {
            Ok(raw) => Ok(raw.is_some()),
            Err(e) => {
                tracing::error!("engine read failure: {e}");
                Err(e.into())
            }
        }
    }

    /// Remove one entry; erasing an absent key succeeds as a no-op
    pub fn erase<K: StoreKey>(&self, key: &K, durable: bool) -> Result<()> {
        let mut batch = self.batch();
        batch.delete(key);
        self.commit(&batch, durable)
    }

    // -------------------------------------------------------------------------
    // Batched Writes
    // -------------------------------------------------------------------------

    /// Start an empty write batch bound to this store
    pub fn batch(&self) -> WriteBatch<'_> {
        WriteBatch::new(self)
    }

    /// Atomically apply every operation in `batch`
    ///
    /// All-or-nothing. On success the caller should `clear` the batch; a
    /// failed commit leaves it untouched for retry or inspection.
    pub fn commit(&self, batch: &WriteBatch<'_>, durable: bool) -> Result<()> {
        if let Err(e) = self.engine.apply(batch.ops(), durable) {
            tracing::error!("engine commit failure: {e}");
            return Err(e.into());
        }
        Ok(())
    }

    /// Push buffered engine state toward disk
    pub fn flush(&self) -> Result<()> {
        self.engine.flush().map_err(Into::into)
    }

    /// Force the engine's write-ahead state to stable storage
    ///
    /// Commits an empty batch with the durable flag forced on.
    pub fn sync(&self) -> Result<()> {
        self.commit(&self.batch(), true)
    }

    // -------------------------------------------------------------------------
    // Iteration & Maintenance
    // -------------------------------------------------------------------------

    /// Create an unpositioned iterator over this store
    pub fn iter(&self) -> StoreIterator<'_> {
        StoreIterator::new(self)
    }

    /// True iff the store holds no application entries
    ///
    /// Positions an iterator at the first key and checks validity; the
    /// reserved sentinel entry does not count.
    pub fn is_empty(&self) -> Result<bool> {
        let mut iter = self.iter();
        iter.seek_to_first()?;
        Ok(!iter.valid())
    }

    /// Approximate engine bytes spanned by `[key_begin, key_end)`
    ///
    /// Explicitly approximate, never exact.
    pub fn estimate_size<K: StoreKey>(&self, key_begin: &K, key_end: &K) -> Result<u64> {
        let begin = encode_key(key_begin);
        let end = encode_key(key_end);
        self.engine.approximate_size(&begin, &end).map_err(Into::into)
    }

    /// Ask the engine to compact `[key_begin, key_end)`
    ///
    /// Best-effort; backends without per-range compaction accept and
    /// ignore the request.
    pub fn compact_range<K: StoreKey>(&self, key_begin: &K, key_end: &K) -> Result<()> {
        let begin = encode_key(key_begin);
        let end = encode_key(key_end);
        self.engine.compact_range(&begin, &end).map_err(Into::into)
    }

    // -------------------------------------------------------------------------
    // Crate-internal Accessors
    // -------------------------------------------------------------------------

    /// Obfuscation key accessor for batch and iterator internals
    ///
    /// Deliberately not public: the key masks values only, and a public
    /// getter would invite applying it to keys.
    pub(crate) fn obfuscation_key(&self) -> &ObfuscationKey {
        &self.obfuscate_key
    }

    /// Engine accessor for iterator internals
    pub(crate) fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }
}
