//! Configuration for veilkv stores
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Where the engine keeps its data
#[derive(Debug, Clone)]
pub enum StoreLocation {
    /// Disk-backed store rooted at the given directory
    Disk(PathBuf),

    /// Ephemeral store backed by the engine's temporary environment,
    /// discarded when the store is dropped
    Memory,
}

/// Main configuration for a Store instance
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Engine Configuration
    // -------------------------------------------------------------------------
    /// Engine data location (disk directory or ephemeral environment)
    pub location: StoreLocation,

    /// Engine cache capacity (in bytes)
    pub cache_bytes: u64,

    /// Destroy all data at the location before the store opens
    pub wipe_existing: bool,

    // -------------------------------------------------------------------------
    // Value Obfuscation
    // -------------------------------------------------------------------------
    /// XOR-obfuscate stored values with a per-store random key
    ///
    /// Only consulted when the store is fresh; an existing store keeps
    /// whatever key it was created with.
    pub obfuscate: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: StoreLocation::Disk(PathBuf::from("./veilkv_data")),
            cache_bytes: 8 * 1024 * 1024, // 8 MB
            wipe_existing: false,
            obfuscate: false,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set a disk-backed location rooted at `path`
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.location = StoreLocation::Disk(path.into());
        self
    }

    /// Use the engine's ephemeral in-memory environment
    pub fn in_memory(mut self) -> Self {
        self.config.location = StoreLocation::Memory;
        self
    }

    /// Set the engine cache capacity (in bytes)
    pub fn cache_bytes(mut self, bytes: u64) -> Self {
        self.config.cache_bytes = bytes;
        self
    }

    /// Wipe all existing data at the location before opening
    pub fn wipe_existing(mut self, wipe: bool) -> Self {
        self.config.wipe_existing = wipe;
        self
    }

    /// Obfuscate stored values (fresh stores only; see [`StoreConfig`])
    pub fn obfuscate(mut self, obfuscate: bool) -> Self {
        self.config.obfuscate = obfuscate;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}
