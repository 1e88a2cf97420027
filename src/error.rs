//! Error types for the disk cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

/// Boxed error type used at the serializer boundary, where the concrete
/// error depends on the plugged-in format.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// == Cache Error Enum ==
/// Unified error type for the disk cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configured capacity is not strictly positive
    #[error("Invalid cache size: {0} megabytes")]
    InvalidCacheSize(f64),

    /// Keys must be non-empty
    #[error("Invalid key: keys must be non-empty")]
    InvalidKey,

    /// A single value may never meet or exceed the whole cache's capacity
    #[error("Object of {size} bytes is too large for a cache of {capacity} bytes")]
    ObjectTooLarge { size: u64, capacity: u64 },

    /// Eviction could not free enough space for the pending write
    #[error("Insufficient space: {needed} bytes needed, {available} bytes available after eviction")]
    InsufficientSpace { needed: u64, available: u64 },

    /// The serializer failed to encode a value
    #[error("Failed to encode value: {0}")]
    Encode(#[source] BoxError),

    /// The serializer failed to decode stored bytes
    #[error("Failed to decode value: {0}")]
    Decode(#[source] BoxError),

    /// Filesystem failure (directory creation, read, write, or delete)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the disk cache.
pub type Result<T> = std::result::Result<T, CacheError>;
