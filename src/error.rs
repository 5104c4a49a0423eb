//! Error types for veilkv
//!
//! Provides a unified error type for all store operations.
//!
//! Not-found is never an error here: point lookups return `Ok(None)`, and
//! stored bytes that fail to decode on a read are absorbed as not-found.

use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};
use crate::engine::EngineError;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Engine Errors
    // -------------------------------------------------------------------------
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("value encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    // -------------------------------------------------------------------------
    // Construction / Usage Errors
    // -------------------------------------------------------------------------
    #[error("validation error: {0}")]
    Validation(String),

    #[error("iterator is not positioned on an entry")]
    InvalidIterator,
}
