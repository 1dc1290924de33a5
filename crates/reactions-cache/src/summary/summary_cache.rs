//! Summary cache trait, key scheme, and driver selection.

use std::sync::Arc;

use async_trait::async_trait;

use reactions_common::SummaryCacheConfig;
use reactions_core::{ReactableRef, ReactionSummary};

use crate::pool::{RedisPool, RedisPoolError};

use super::{MemorySummaryCache, RedisSummaryCache};

/// Error type for summary cache operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis cache error: {0}")]
    Pool(#[from] RedisPoolError),

    #[error("Unknown summary cache driver: {0}")]
    UnknownDriver(String),
}

/// Result type for summary cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Which summary computation a cached entry belongs to.
///
/// The loaded and query paths are cached under separate keys so a
/// reactable with configured aggregation rules never serves an entry
/// computed for the unconfigured path, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryVariant {
    /// Summary computed in-process over loaded reactions
    Loaded,
    /// Summary computed by the database in a single grouped query
    Query,
}

impl std::fmt::Display for SummaryVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::Query => write!(f, "query"),
        }
    }
}

/// Build the cache key for a reactable's summary
#[must_use]
pub fn summary_key(variant: SummaryVariant, reactable: &ReactableRef) -> String {
    format!(
        "reaction_summary:{variant}:{}:{}",
        reactable.kind, reactable.id
    )
}

/// Storage backend for computed reaction summaries
#[async_trait]
pub trait SummaryCache: Send + Sync {
    /// Look up a cached summary by key
    async fn get(&self, key: &str) -> CacheResult<Option<ReactionSummary>>;

    /// Store a summary under the given key with a TTL in seconds
    async fn put(&self, key: &str, summary: &ReactionSummary, ttl_seconds: u64) -> CacheResult<()>;
}

/// Select a summary cache backend by the configured driver name
pub fn summary_cache_from_config(
    config: &SummaryCacheConfig,
    pool: &RedisPool,
) -> CacheResult<Arc<dyn SummaryCache>> {
    match config.driver.as_str() {
        "redis" => Ok(Arc::new(RedisSummaryCache::new(pool.clone()))),
        "memory" => Ok(Arc::new(MemorySummaryCache::new())),
        other => Err(CacheError::UnknownDriver(other.to_string())),
    }
}
