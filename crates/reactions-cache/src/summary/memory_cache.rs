//! In-process summary cache.
//!
//! Useful for single-process deployments and tests. Expired entries are
//! dropped lazily on lookup.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;

use reactions_core::ReactionSummary;

use super::{CacheResult, SummaryCache};

struct Entry {
    summary: ReactionSummary,
    expires_at: Instant,
}

/// Summary cache held in process memory
#[derive(Default)]
pub struct MemorySummaryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemorySummaryCache {
    /// Create a new empty memory cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (possibly expired) entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl SummaryCache for MemorySummaryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<ReactionSummary>> {
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.summary.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, summary: &ReactionSummary, ttl_seconds: u64) -> CacheResult<()> {
        // A zero TTL means the entry would be expired on arrival
        if ttl_seconds == 0 {
            return Ok(());
        }

        let entry = Entry {
            summary: summary.clone(),
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        };
        self.entries.lock().insert(key.to_string(), entry);

        Ok(())
    }
}
