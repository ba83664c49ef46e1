//! Cache stores for fetched posts
//!
//! The fetcher talks to a [`CacheStore`] rather than a concrete backend so the
//! host can pick where entries live. [`CacheManager`] persists entries to disk
//! (`~/.cache/json-fetcher/` on Linux) so they outlive the process, while
//! [`MemoryCache`] keeps them for the lifetime of a single process. Both stamp
//! expiry times with an injectable [`Clock`].

mod clock;
mod manager;
mod memory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::CacheManager;
pub use memory::MemoryCache;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Post;

/// Errors that can occur when writing to a cache store
#[derive(Debug, Error)]
pub enum CacheError {
    /// Creating the cache directory or writing the entry failed
    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The entry could not be serialized
    #[error("Failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A live cache entry as handed back by [`CacheStore::get`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Key the entry was stored under
    pub key: String,
    /// The cached posts, in the order they were fetched
    pub value: Vec<Post>,
    /// When the entry was written
    pub cached_at: DateTime<Utc>,
    /// When the entry stops being served
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Builds an entry that expires `ttl` after `now`
    ///
    /// Expiry saturates at the latest representable time instead of overflowing.
    pub fn new(key: &str, value: Vec<Post>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            key: key.to_string(),
            value,
            cached_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// An entry is expired once the clock has moved past `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Key-value store with per-entry expiry
///
/// Implementations never return expired entries: an absent, expired or
/// unreadable entry is reported as `None` so callers treat all three as a miss.
pub trait CacheStore: Send + Sync {
    /// Returns the unexpired entry stored under `key`, if any
    fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Stores `value` under `key`, replacing any previous entry, expiring `ttl` from now
    fn set(&self, key: &str, value: &[Post], ttl: Duration) -> Result<(), CacheError>;
}
