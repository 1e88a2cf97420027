//! Integration Tests for the Disk Cache
//!
//! Exercises the public API end to end against real directories: the
//! byte-exact eviction scenario, storage reuse across constructions, and
//! the cached-value wrapper.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use disk_cache::{CacheConfig, CachedValue, DiskCache, Megabytes, RawSerializer};

// == Helper Functions ==

/// Rewinds an entry file's modification time by `secs` seconds, making
/// eviction order deterministic regardless of timestamp resolution.
fn backdate(directory: &Path, key: &str, secs: u64) {
    let file = fs::OpenOptions::new()
        .write(true)
        .open(directory.join(key))
        .unwrap();
    let then = SystemTime::now() - Duration::from_secs(secs);
    file.set_times(fs::FileTimes::new().set_modified(then))
        .unwrap();
}

fn raw_cache(root: &Path, megabytes: f64) -> DiskCache<Vec<u8>, RawSerializer> {
    DiskCache::with_serializer(
        CacheConfig::new(megabytes, "integration", root),
        RawSerializer,
    )
    .unwrap()
}

// == Eviction Scenario ==

/// Three writes sized so that any two fit but all three do not. The third
/// write must push out the least recently used entry and land exactly on
/// the expected availability.
#[test]
fn test_lru_flush_scenario() {
    let root = TempDir::new().unwrap();
    let cache = raw_cache(root.path(), 1.0);
    assert_eq!(cache.max_bytes(), 1_048_576);

    cache.set("a", &vec![0xAA; 666_670]).unwrap();
    backdate(cache.directory(), "a", 30);

    cache.set("b", &vec![0xBB; 266_670]).unwrap();
    backdate(cache.directory(), "b", 20);

    cache.set("c", &vec![0xCC; 533_338]).unwrap();

    assert_eq!(cache.available().unwrap(), 248_568);
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("b").map(|v| v.len()), Some(266_670));
    assert_eq!(cache.get("c").map(|v| v.len()), Some(533_338));
}

/// Reading an entry refreshes its recency, so a read-then-write sequence
/// evicts the untouched entry instead.
#[test]
fn test_read_refreshes_recency() {
    let root = TempDir::new().unwrap();
    let cache = raw_cache(root.path(), 1.0);

    cache.set("a", &vec![0xAA; 666_670]).unwrap();
    backdate(cache.directory(), "a", 30);

    cache.set("b", &vec![0xBB; 266_670]).unwrap();
    backdate(cache.directory(), "b", 20);

    // "a" would be next out the door; reading it saves it
    assert!(cache.get("a").is_some());

    cache.set("c", &vec![0xCC; 266_670]).unwrap();

    assert!(cache.get("a").is_some());
    assert_eq!(cache.get("b"), None);
    assert!(cache.get("c").is_some());
    assert!(cache.used_bytes().unwrap() <= cache.max_bytes());
}

// == Persistence Across Constructions ==

#[test]
fn test_storage_survives_reconstruction() {
    let root = TempDir::new().unwrap();
    let config = CacheConfig::new(10.0, "persistent", root.path());

    {
        let cache: DiskCache<String> = DiskCache::open(config.clone()).unwrap();
        cache.set("survivor", &"still here".to_string()).unwrap();
    }

    let reopened: DiskCache<String> = DiskCache::open(config).unwrap();
    assert_eq!(reopened.get("survivor"), Some("still here".to_string()));
}

#[test]
fn test_identifiers_namespace_storage() {
    let root = TempDir::new().unwrap();

    let thumbnails: DiskCache<String> =
        DiskCache::open(CacheConfig::new(10.0, "thumbnails", root.path())).unwrap();
    let sessions: DiskCache<String> =
        DiskCache::open(CacheConfig::new(10.0, "sessions", root.path())).unwrap();

    thumbnails.set("key", &"a thumbnail".to_string()).unwrap();
    sessions.set("key", &"a session".to_string()).unwrap();

    assert_eq!(thumbnails.get("key"), Some("a thumbnail".to_string()));
    assert_eq!(sessions.get("key"), Some("a session".to_string()));

    sessions.empty().unwrap();
    assert_eq!(sessions.get("key"), None);
    assert_eq!(thumbnails.get("key"), Some("a thumbnail".to_string()));
}

// == Typed Values ==

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    age: u32,
    lives: u32,
}

#[test]
fn test_struct_values_round_trip() {
    let root = TempDir::new().unwrap();
    let cache: DiskCache<Profile> =
        DiskCache::open(CacheConfig::new(10.0, "profiles", root.path())).unwrap();

    let profile = Profile {
        name: "Purrack".to_string(),
        age: 7,
        lives: 9,
    };

    cache.set("president", &profile).unwrap();
    assert_eq!(cache.get("president"), Some(profile));
}

// == Cached Value Wrapper ==

#[test]
fn test_cached_value_end_to_end() {
    let root = TempDir::new().unwrap();
    let cache: DiskCache<u32> =
        DiskCache::open(CacheConfig::new(10.0, "wrapper", root.path())).unwrap();

    let age = CachedValue::new(&cache, "cat-age");
    assert_eq!(age.get(), None);

    age.set(&7).unwrap();
    assert_eq!(age.get(), Some(7));

    // Changing the value through a second binding is visible to the first
    let same_age = CachedValue::new(&cache, "cat-age");
    same_age.set(&8).unwrap();
    assert_eq!(age.get(), Some(8));

    let lives = CachedValue::with_initial(&cache, "lives", &9).unwrap();
    assert_eq!(lives.get(), Some(9));
}

// == Capacity Edge Cases ==

#[test]
fn test_fractional_megabyte_capacity() {
    let root = TempDir::new().unwrap();
    let cache = raw_cache(root.path(), 0.25);

    assert_eq!(cache.max_bytes(), 262_144);
    assert_eq!(cache.available().unwrap(), 262_144);

    cache.set("quarter", &vec![0u8; 100_000]).unwrap();
    assert_eq!(cache.available().unwrap(), 162_144);
}

#[test]
fn test_megabytes_type_conversions() {
    assert_eq!(Megabytes::from(2u32).as_bytes(), 2_097_152);
    assert_eq!(Megabytes::from(1.5).as_bytes(), 1_572_864);
}
