//! Capacity Accounting Module
//!
//! Derived queries over the cache directory. Nothing here keeps state:
//! every call rescans the directory, so out-of-band changes to the entry
//! files are observed immediately at the cost of an O(entries) listing.

use std::path::Path;

use crate::cache::entry::scan_entries;
use crate::error::Result;

// == Used Bytes ==
/// Sums the on-disk size of every entry in the directory.
pub fn used_bytes(dir: &Path) -> Result<u64> {
    let entries = scan_entries(dir)?;
    Ok(entries.iter().map(|entry| entry.bytes).sum())
}

// == Available Bytes ==
/// Bytes still available under the capacity ceiling.
///
/// Saturates at zero: entries modified out-of-band can push usage past the
/// ceiling, and a negative availability is not meaningful to callers.
pub fn available_bytes(dir: &Path, max_bytes: u64) -> Result<u64> {
    Ok(max_bytes.saturating_sub(used_bytes(dir)?))
}
