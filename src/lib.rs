//! # veilkv
//!
//! A typed access layer over an embedded, ordered key-value engine:
//! - Order-preserving key codecs, so range scans iterate in typed order
//! - Atomic write batches with an engine-accurate size estimate
//! - Optional XOR obfuscation of values at rest
//! - Cursor iteration with lazy, per-call decoding
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Application                            │
//! │                  (typed keys / values)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Store                                │
//! │     read / write / exists / erase / iterate / maintain       │
//! └──────┬───────────────────┬──────────────────────┬───────────┘
//!        │                   │                      │
//!        ▼                   ▼                      ▼
//! ┌─────────────┐     ┌─────────────┐        ┌─────────────┐
//! │    Codec    │     │ WriteBatch  │        │  Iterator   │
//! │  (encode /  │     │ (ops + size │        │  (cursor +  │
//! │   decode)   │     │  estimate)  │        │   decode)   │
//! └─────────────┘     └──────┬──────┘        └──────┬──────┘
//!                            │    ObfuscationKey    │
//!                            │   (XOR values only)  │
//!                            ▼                      ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Engine (sled)                           │
//! │           ordered byte keyspace, atomic batches              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod engine;
pub mod obfuscate;
pub mod batch;
pub mod iterator;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use batch::WriteBatch;
pub use codec::{DecodeError, EncodeError, StoreKey, StoreValue};
pub use config::{StoreConfig, StoreConfigBuilder, StoreLocation};
pub use engine::{Engine, EngineError, EngineOp, RawEntry, SledEngine};
pub use error::{Result, StoreError};
pub use iterator::StoreIterator;
pub use obfuscate::{ObfuscationKey, OBFUSCATE_KEY_LEN};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of veilkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
