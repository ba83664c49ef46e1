//! In-process cache store

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use parking_lot::RwLock;

use super::{CacheEntry, CacheError, CacheStore, Clock, SystemClock};
use crate::data::Post;

/// Cache store that lives as long as the process
///
/// Used when no cache directory is available. Expired entries are dropped
/// lazily the next time their key is written.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of stored entries, including expired ones not yet replaced
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;

        if entry.is_expired_at(self.clock.now()) {
            return None;
        }
        Some(entry.clone())
    }

    fn set(&self, key: &str, value: &[Post], ttl: Duration) -> Result<(), CacheError> {
        let entry = CacheEntry::new(key, value.to_vec(), self.clock.now(), ttl);
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }
}
