//! Cache Engine Module
//!
//! The public-facing cache: one file per key under a dedicated directory,
//! with capacity enforcement and LRU eviction. A file's modification time
//! doubles as the entry's last-used time, refreshed on both write and
//! read, so no separate index has to be kept consistent with the files.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::entry::{self, EntryMeta};
use crate::cache::{capacity, eviction, CacheStats};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::serialize::{JsonSerializer, Serializer};

// == Disk Cache ==
/// Disk-backed key/value cache bounded to a maximum total size.
///
/// Every operation on one instance is serialized behind a single lock, so
/// a capacity check can never race with another writer's eviction and a
/// recency touch can never race with an eviction of the same entry. The
/// lock also guards the hit/miss/eviction counters.
#[derive(Debug)]
pub struct DiskCache<T, S = JsonSerializer> {
    /// Directory holding all entries; owned exclusively by this cache
    directory: PathBuf,
    /// Capacity ceiling in bytes, fixed at construction
    max_bytes: u64,
    /// Pluggable value encoding
    serializer: S,
    /// Lifetime counters; the guard doubles as the operation lock
    stats: Mutex<CacheStats>,
    _value: PhantomData<fn() -> T>,
}

impl<T> DiskCache<T>
where
    JsonSerializer: Serializer<T>,
{
    // == Constructor ==
    /// Opens a cache with the default JSON serializer.
    ///
    /// See [`DiskCache::with_serializer`] for the construction rules.
    pub fn open(config: CacheConfig) -> Result<Self> {
        Self::with_serializer(config, JsonSerializer)
    }
}

impl<T, S: Serializer<T>> DiskCache<T, S> {
    /// Opens a cache backed by `root/identifier`, creating the directory
    /// if absent.
    ///
    /// Reusing the same identifier and root reaches the same storage
    /// across process runs.
    ///
    /// # Errors
    /// - `InvalidCacheSize` if the configured size is not strictly positive
    /// - `Io` if the backing directory cannot be created
    pub fn with_serializer(config: CacheConfig, serializer: S) -> Result<Self> {
        let megabytes = config.size.0;
        if megabytes.is_nan() || megabytes <= 0.0 {
            return Err(CacheError::InvalidCacheSize(megabytes));
        }

        let directory = config.directory();
        fs::create_dir_all(&directory)?;
        debug!("Cache directory: {}", directory.display());

        Ok(Self {
            directory,
            max_bytes: config.size.as_bytes(),
            serializer,
            stats: Mutex::new(CacheStats::new()),
            _value: PhantomData,
        })
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// A miss is not an error: a missing file, unreadable bytes, or a
    /// decode failure all return `None`, since any entry can be evicted
    /// or lost at any time. On a hit the entry's last-used time is
    /// refreshed, which defers its eviction.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut stats = self.stats.lock();

        match self.read_entry(key) {
            Ok(value) => {
                stats.record_hit();
                Some(value)
            }
            Err(err) => {
                debug!("Cache miss for {}: {}", key, err);
                stats.record_miss();
                None
            }
        }
    }

    /// Touches and reads one entry. The touch comes first so the entry's
    /// recency reflects the access attempt even if the read then fails.
    fn read_entry(&self, key: &str) -> Result<T> {
        let path = self.entry_path(key);
        touch(&path)?;
        let bytes = fs::read(&path)?;
        self.serializer.decode(&bytes).map_err(CacheError::Decode)
    }

    // == Set ==
    /// Stores `value` under `key`, evicting least recently used entries
    /// if the encoded bytes do not fit in the remaining capacity.
    ///
    /// Writing an existing key replaces the prior entry: last write wins,
    /// regardless of the prior value's size. While space is being made,
    /// the prior entry under the same key is an ordinary eviction
    /// candidate like any other.
    ///
    /// # Errors
    /// - `InvalidKey` for an empty key
    /// - `Encode` if the serializer rejects the value
    /// - `ObjectTooLarge` if the encoded size meets or exceeds the whole
    ///   cache's capacity
    /// - `InsufficientSpace` if eviction could not free enough room; the
    ///   capacity ceiling is never exceeded silently
    /// - `Io` if the entry file cannot be written
    pub fn set(&self, key: &str, value: &T) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey);
        }

        let encoded = self.serializer.encode(value).map_err(CacheError::Encode)?;
        let size = encoded.len() as u64;

        let mut stats = self.stats.lock();

        if size >= self.max_bytes {
            return Err(CacheError::ObjectTooLarge {
                size,
                capacity: self.max_bytes,
            });
        }

        let available = capacity::available_bytes(&self.directory, self.max_bytes)?;
        debug!("Available: {} bytes, new item: {} bytes", available, size);

        if size > available {
            let outcome = eviction::evict(&self.directory, size - available)?;
            stats.record_evictions(outcome.removed as u64);

            // Eviction is best-effort per entry, so re-check rather than
            // trust the plan.
            let available = capacity::available_bytes(&self.directory, self.max_bytes)?;
            if size > available {
                return Err(CacheError::InsufficientSpace {
                    needed: size,
                    available,
                });
            }
        }

        fs::write(self.entry_path(key), &encoded)?;
        Ok(())
    }

    // == Remove ==
    /// Deletes the entry stored under `key`.
    ///
    /// Returns `Ok(false)` when no such entry exists.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let _stats = self.stats.lock();

        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    // == Empty ==
    /// Removes every entry in the cache.
    ///
    /// Best-effort bulk operation: a failure to delete one entry does not
    /// stop the rest, and entries already removed stay removed. The first
    /// failure is reported after the sweep completes.
    pub fn empty(&self) -> Result<()> {
        let _stats = self.stats.lock();

        let mut first_err: Option<io::Error> = None;
        for dir_entry in fs::read_dir(&self.directory)? {
            let dir_entry = dir_entry?;
            let is_file = dir_entry
                .file_type()
                .map(|file_type| file_type.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }

            if let Err(err) = fs::remove_file(dir_entry.path()) {
                warn!(
                    "Could not remove {}: {}",
                    dir_entry.path().display(),
                    err
                );
                first_err.get_or_insert(err);
            }
        }

        match first_err {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    // == Capacity Queries ==
    /// Bytes still available under the capacity ceiling.
    ///
    /// Recomputed from the directory's entries on every call rather than
    /// tracked incrementally, so out-of-band changes are observed at the
    /// cost of an O(entries) scan.
    pub fn available(&self) -> Result<u64> {
        let _stats = self.stats.lock();
        capacity::available_bytes(&self.directory, self.max_bytes)
    }

    /// Sum of all entry sizes currently on disk.
    pub fn used_bytes(&self) -> Result<u64> {
        let _stats = self.stats.lock();
        capacity::used_bytes(&self.directory)
    }

    /// Number of entries currently on disk.
    pub fn len(&self) -> Result<usize> {
        let _stats = self.stats.lock();
        Ok(entry::scan_entries(&self.directory)?.len())
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // == Entries ==
    /// Lists the cache's entries, most recently used first.
    pub fn entries(&self) -> Result<Vec<EntryMeta>> {
        let _stats = self.stats.lock();
        let mut entries = entry::scan_entries(&self.directory)?;
        entries.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        Ok(entries)
    }

    // == Stats ==
    /// Snapshot of the lifetime counters plus the directory's current
    /// entry count and used bytes.
    pub fn stats(&self) -> Result<CacheStats> {
        let stats = self.stats.lock();
        let entries = entry::scan_entries(&self.directory)?;

        let mut snapshot = stats.clone();
        snapshot.entries = entries.len();
        snapshot.used_bytes = entries.iter().map(|entry| entry.bytes).sum();
        Ok(snapshot)
    }

    // == Accessors ==
    /// The directory holding this cache's entries.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The capacity ceiling in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Path of the entry file for `key`.
    ///
    /// The key is used verbatim as the file name. Keys containing path
    /// separators or reserved names are not sanitized and can address
    /// files outside the cache directory.
    fn entry_path(&self, key: &str) -> PathBuf {
        self.directory.join(key)
    }
}

/// Refreshes a file's modification time, marking the entry as just used.
fn touch(path: &Path) -> io::Result<()> {
    let file = fs::OpenOptions::new().write(true).open(path)?;
    file.set_times(fs::FileTimes::new().set_modified(SystemTime::now()))
}
