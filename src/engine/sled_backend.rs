//! sled-backed engine
//!
//! Binds the [`Engine`] contract to the sled embedded store. sled brings
//! the ordered keyspace, atomic `apply_batch`, fsync via `flush`, and the
//! disk/temporary environment split; the two maintenance hooks it lacks
//! are derived or accepted as no-ops here, and documented as such.

use crate::config::{StoreConfig, StoreLocation};

use super::{Engine, EngineError, EngineOp, RawEntry};

impl From<sled::Error> for EngineError {
    fn from(e: sled::Error) -> Self {
        EngineError::new(e.to_string())
    }
}

/// [`Engine`] implementation over a sled database
pub struct SledEngine {
    db: sled::Db,
}

impl SledEngine {
    /// Open (or create) an engine as described by `config`
    ///
    /// `wipe_existing` clears every entry before the engine is handed
    /// out, matching the contract's wipe-on-open option.
    pub fn open(config: &StoreConfig) -> Result<Self, EngineError> {
        let sled_config = match &config.location {
            StoreLocation::Disk(path) => sled::Config::new()
                .path(path)
                .cache_capacity(config.cache_bytes),
            StoreLocation::Memory => sled::Config::new()
                .temporary(true)
                .cache_capacity(config.cache_bytes),
        };
        let db = sled_config.open()?;
        if config.wipe_existing {
            tracing::info!("wiping existing store contents before open");
            db.clear()?;
            db.flush()?;
        }
        Ok(Self { db })
    }
}

impl Engine for SledEngine {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    fn apply(&self, ops: &[EngineOp], durable: bool) -> Result<(), EngineError> {
        let mut batch = sled::Batch::default();
        for op in ops {
            match op {
                EngineOp::Put { key, value } => batch.insert(key.as_slice(), value.as_slice()),
                EngineOp::Delete { key } => batch.remove(key.as_slice()),
            }
        }
        self.db.apply_batch(batch)?;
        if durable {
            self.db.flush()?;
        }
        Ok(())
    }

    fn scan(
        &self,
        start: Option<&[u8]>,
    ) -> Box<dyn Iterator<Item = Result<RawEntry, EngineError>> + '_> {
        let iter = match start {
            Some(start) => self.db.range(start.to_vec()..),
            None => self.db.range::<Vec<u8>, _>(..),
        };
        Box::new(iter.map(|item| {
            item.map(|(k, v)| (k.to_vec(), v.to_vec()))
                .map_err(EngineError::from)
        }))
    }

    fn approximate_size(&self, begin: &[u8], end: &[u8]) -> Result<u64, EngineError> {
        // sled has no approximate-range-size primitive; sum the logical
        // entry sizes instead. Ignores on-disk framing and compression,
        // so the result is still an approximation.
        let mut total = 0u64;
        for item in self.db.range(begin.to_vec()..end.to_vec()) {
            let (k, v) = item?;
            total += (k.len() + v.len()) as u64;
        }
        Ok(total)
    }

    fn compact_range(&self, _begin: &[u8], _end: &[u8]) -> Result<(), EngineError> {
        // sled compacts in the background on its own schedule and exposes
        // no per-range hook; accept the request as a compatibility no-op.
        tracing::debug!("compact_range is a no-op for the sled backend");
        Ok(())
    }

    fn flush(&self) -> Result<(), EngineError> {
        self.db.flush()?;
        Ok(())
    }
}
