//! Configuration Module
//!
//! Cache sizing and placement. The identifier is always explicit: two
//! constructions with the same identifier and root share storage across
//! process runs.

use std::env;
use std::path::PathBuf;

/// Number of bytes in one megabyte (1 MiB chunks).
pub const BYTES_PER_MEGABYTE: u64 = 1_048_576;

/// Default cache size in megabytes when none is configured.
pub const DEFAULT_SIZE_MB: f64 = 10.0;

// == Megabytes ==
/// Cache capacity expressed in megabytes.
///
/// Fractional sizes are allowed; conversion to bytes truncates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Megabytes(pub f64);

impl Megabytes {
    pub fn new(size: f64) -> Self {
        Self(size)
    }

    /// Converts to a byte count, truncating any fractional byte.
    pub fn as_bytes(self) -> u64 {
        (self.0 * BYTES_PER_MEGABYTE as f64) as u64
    }
}

impl From<f64> for Megabytes {
    fn from(size: f64) -> Self {
        Self(size)
    }
}

impl From<u32> for Megabytes {
    fn from(size: u32) -> Self {
        Self(f64::from(size))
    }
}

impl std::fmt::Display for Megabytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} MB", self.0)
    }
}

// == Cache Config ==
/// Construction parameters for a cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Capacity ceiling for the sum of all entry sizes
    pub size: Megabytes,
    /// Namespaces the cache directory on disk; reusing an identifier
    /// reuses the same storage between runs
    pub identifier: String,
    /// Already-resolved base directory the cache directory lives under
    pub root: PathBuf,
}

impl CacheConfig {
    /// Creates a config with an explicit size.
    pub fn new(
        size: impl Into<Megabytes>,
        identifier: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            size: size.into(),
            identifier: identifier.into(),
            root: root.into(),
        }
    }

    /// Creates a config whose size can be overridden from the environment.
    ///
    /// # Environment Variables
    /// - `CACHE_SIZE_MB` - Capacity in megabytes (default: 10)
    pub fn from_env(identifier: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        let size = env::var("CACHE_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(DEFAULT_SIZE_MB);

        Self::new(size, identifier, root)
    }

    /// The directory holding this cache's entries.
    pub fn directory(&self) -> PathBuf {
        self.root.join(&self.identifier)
    }
}
