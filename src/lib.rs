//! Disk Cache - a bounded, persistent key/value cache
//!
//! Stores serialized values as one file per key under a dedicated
//! directory, enforces a maximum total size, and evicts least recently
//! used entries to make room for new writes. Recency is the file's
//! modification time, refreshed on read and write, so the cache survives
//! process restarts without any separate index to keep consistent.

pub mod cache;
pub mod cached;
pub mod config;
pub mod error;
pub mod serialize;

pub use cache::{CacheStats, DiskCache, EntryMeta};
pub use cached::CachedValue;
pub use config::{CacheConfig, Megabytes, BYTES_PER_MEGABYTE};
pub use error::{BoxError, CacheError, Result};
pub use serialize::{JsonSerializer, RawSerializer, Serializer};
