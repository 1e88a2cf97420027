//! Eviction Policy Module
//!
//! Least-recently-used eviction driven by file modification times.
//! Planning is a pure function over scanned entry metadata; deletion is a
//! separate best-effort pass so one stubborn file cannot block the rest.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::cache::entry::{scan_entries, EntryMeta};
use crate::error::Result;

// == Eviction Result ==
/// Outcome of one eviction run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvictionResult {
    /// Bytes actually reclaimed from disk
    pub freed_bytes: u64,
    /// Number of entries actually removed
    pub removed: usize,
}

// == Eviction Planning ==
/// Selects the entries to remove so that at least `target_bytes` are freed.
///
/// Entries are ordered most-recently-used first and victims are taken from
/// the least-recently-used end. The loop continues while the freed total is
/// `<= target_bytes`, so when entries suffice the plan frees strictly more
/// than the target, which can select one entry beyond the minimum. If all
/// entries together do not reach the target, the plan is simply every
/// entry and the caller decides whether the pending write still fits.
pub fn plan_eviction(mut entries: Vec<EntryMeta>, target_bytes: u64) -> Vec<EntryMeta> {
    entries.sort_by(|a, b| b.last_used.cmp(&a.last_used));

    let mut victims = Vec::new();
    let mut freed: u64 = 0;

    while freed <= target_bytes {
        match entries.pop() {
            Some(oldest) => {
                freed += oldest.bytes;
                victims.push(oldest);
            }
            None => break,
        }
    }

    victims
}

// == Eviction ==
/// Frees at least `target_bytes` from the cache directory, least recently
/// used entries first.
///
/// Deletion is best-effort per entry: a failure is logged and skipped, and
/// only successfully removed entries count toward the result.
pub fn evict(dir: &Path, target_bytes: u64) -> Result<EvictionResult> {
    let entries = scan_entries(dir)?;
    let victims = plan_eviction(entries, target_bytes);

    let mut result = EvictionResult::default();
    for victim in victims {
        match fs::remove_file(&victim.path) {
            Ok(()) => {
                debug!("Evicted {} ({} bytes)", victim.key, victim.bytes);
                result.freed_bytes += victim.bytes;
                result.removed += 1;
            }
            Err(err) => {
                warn!("Could not evict {}: {}", victim.key, err);
            }
        }
    }

    Ok(result)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Builds entry metadata aged by `age_secs` seconds.
    fn meta(key: &str, bytes: u64, age_secs: i64) -> EntryMeta {
        EntryMeta {
            key: key.to_string(),
            path: PathBuf::from(key),
            bytes,
            last_used: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[test]
    fn test_plan_selects_least_recently_used_first() {
        let entries = vec![
            meta("newest", 100, 0),
            meta("oldest", 100, 30),
            meta("middle", 100, 15),
        ];

        let victims = plan_eviction(entries, 150);

        assert_eq!(victims.len(), 2);
        assert_eq!(victims[0].key, "oldest");
        assert_eq!(victims[1].key, "middle");
    }

    #[test]
    fn test_plan_frees_strictly_more_than_target() {
        // Freeing the oldest entry alone meets the target exactly, and the
        // loop's continuation test still takes one more.
        let entries = vec![meta("a", 100, 30), meta("b", 100, 20), meta("c", 100, 10)];

        let victims = plan_eviction(entries, 100);

        assert_eq!(victims.len(), 2);
        assert_eq!(victims[0].key, "a");
        assert_eq!(victims[1].key, "b");
    }

    #[test]
    fn test_plan_single_entry_past_target() {
        let entries = vec![meta("big", 1000, 30), meta("small", 10, 10)];

        let victims = plan_eviction(entries, 500);

        assert_eq!(victims.len(), 1);
        assert_eq!(victims[0].key, "big");
    }

    #[test]
    fn test_plan_exhausts_entries_when_target_unreachable() {
        let entries = vec![meta("a", 100, 30), meta("b", 100, 20)];

        let victims = plan_eviction(entries, 10_000);

        assert_eq!(victims.len(), 2);
    }

    #[test]
    fn test_plan_empty_input() {
        let victims = plan_eviction(Vec::new(), 100);
        assert!(victims.is_empty());
    }

    #[test]
    fn test_evict_removes_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a"), vec![0u8; 100]).unwrap();
        std::fs::write(dir.path().join("b"), vec![0u8; 200]).unwrap();

        // Target beyond the total: everything goes regardless of order
        let result = evict(dir.path(), 10_000).unwrap();

        assert_eq!(result.freed_bytes, 300);
        assert_eq!(result.removed, 2);
        assert_eq!(scan_entries(dir.path()).unwrap().len(), 0);
    }

    #[test]
    fn test_evict_empty_directory() {
        let dir = TempDir::new().unwrap();
        let result = evict(dir.path(), 100).unwrap();

        assert_eq!(result.freed_bytes, 0);
        assert_eq!(result.removed, 0);
    }
}
