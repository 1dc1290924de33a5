//! Redis-backed summary cache.

use async_trait::async_trait;

use reactions_core::ReactionSummary;

use crate::pool::RedisPool;

use super::{CacheResult, SummaryCache};

/// Summary cache backed by the shared Redis pool
#[derive(Debug, Clone)]
pub struct RedisSummaryCache {
    pool: RedisPool,
}

impl RedisSummaryCache {
    /// Create a new Redis summary cache
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryCache for RedisSummaryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<ReactionSummary>> {
        let value = self.pool.get_json::<ReactionSummary>(key).await?;

        if value.is_some() {
            tracing::debug!(key = %key, "Summary cache hit");
        } else {
            tracing::debug!(key = %key, "Summary cache miss");
        }

        Ok(value)
    }

    async fn put(&self, key: &str, summary: &ReactionSummary, ttl_seconds: u64) -> CacheResult<()> {
        // A zero TTL disables storage, same as the memory driver
        if ttl_seconds == 0 {
            return Ok(());
        }

        self.pool.set_json(key, summary, ttl_seconds).await?;

        tracing::debug!(key = %key, ttl_seconds = ttl_seconds, "Summary cached");

        Ok(())
    }
}
