//! Cached Value Module
//!
//! Convenience wrapper binding one key to one cache, so a frequently-used
//! entry reads like a plain field instead of a key lookup.

use crate::cache::DiskCache;
use crate::error::Result;
use crate::serialize::{JsonSerializer, Serializer};

// == Cached Value ==
/// A single cached value identified by a fixed key.
///
/// Pure sugar over [`DiskCache::get`] and [`DiskCache::set`]; it adds no
/// behavior of its own. The value stays as ephemeral as any other cache
/// entry and can be evicted between a `set` and the next `get`.
#[derive(Debug)]
pub struct CachedValue<'a, T, S = JsonSerializer> {
    key: String,
    cache: &'a DiskCache<T, S>,
}

impl<'a, T, S: Serializer<T>> CachedValue<'a, T, S> {
    /// Binds `key` in `cache` without writing anything.
    pub fn new(cache: &'a DiskCache<T, S>, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cache,
        }
    }

    /// Binds `key` and stores an initial value right away.
    pub fn with_initial(
        cache: &'a DiskCache<T, S>,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        let cached = Self::new(cache, key);
        cached.set(value)?;
        Ok(cached)
    }

    /// The key this wrapper reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the current value, if still cached.
    pub fn get(&self) -> Option<T> {
        self.cache.get(&self.key)
    }

    /// Stores a new value under the bound key.
    pub fn set(&self, value: &T) -> Result<()> {
        self.cache.set(&self.key, value)
    }
}
