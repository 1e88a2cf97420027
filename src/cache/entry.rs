//! Cache Entry Module
//!
//! Metadata for stored entries, derived entirely from the filesystem.
//! There is no separate index: the file's name is the key, its length is
//! the entry size, and its modification time is the recency signal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Entry Metadata ==
/// One stored entry as seen in a directory scan.
#[derive(Debug, Clone, Serialize)]
pub struct EntryMeta {
    /// The entry's key, verbatim from the file name
    pub key: String,
    /// Full path to the entry file
    pub path: PathBuf,
    /// Encoded payload size on disk
    pub bytes: u64,
    /// Last time the entry was written or read
    pub last_used: DateTime<Utc>,
}

// == Directory Scan ==
/// Lists every entry in the cache directory with its size and last-used
/// time.
///
/// Entries can vanish or become unreadable at any moment (that is the
/// nature of a cache), so files whose metadata cannot be read are skipped
/// rather than failing the whole scan. Subdirectories are ignored.
pub fn scan_entries(dir: &Path) -> io::Result<Vec<EntryMeta>> {
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(dir)? {
        let dir_entry = dir_entry?;

        let metadata = match dir_entry.metadata() {
            Ok(metadata) => metadata,
            Err(_) => continue,
        };
        if !metadata.is_file() {
            continue;
        }
        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(_) => continue,
        };

        entries.push(EntryMeta {
            key: dir_entry.file_name().to_string_lossy().into_owned(),
            path: dir_entry.path(),
            bytes: metadata.len(),
            last_used: DateTime::<Utc>::from(modified),
        });
    }

    Ok(entries)
}
