//! Disk-backed cache store
//!
//! Provides a `CacheManager` that stores fetched posts as JSON files with
//! expiry timestamps, so cached entries survive process restarts.

use chrono::Duration;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{CacheEntry, CacheError, CacheStore, Clock, SystemClock};
use crate::data::Post;

/// Manages reading and writing cache entries to disk
///
/// Entries are stored as `<key>.json` in an XDG-compliant cache directory
/// (`~/.cache/json-fetcher/` on Linux). Each file records when it expires;
/// expired or corrupt files are reported as misses and overwritten on the next
/// successful fetch.
#[derive(Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl CacheManager {
    /// Creates a new CacheManager using the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "json-fetcher")?;
        Some(Self::with_dir(project_dirs.cache_dir().to_path_buf()))
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used to stamp and check expiry
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Directory holding the cache files
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

impl CacheStore for CacheManager {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        let content = fs::read_to_string(self.cache_path(key)).ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;

        if entry.is_expired_at(self.clock.now()) {
            return None;
        }
        Some(entry)
    }

    fn set(&self, key: &str, value: &[Post], ttl: Duration) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir)?;

        let entry = CacheEntry::new(key, value.to_vec(), self.clock.now(), ttl);
        let json = serde_json::to_string_pretty(&entry)?;

        fs::write(self.cache_path(key), json)?;
        Ok(())
    }
}
