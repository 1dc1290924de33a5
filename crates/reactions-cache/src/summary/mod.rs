//! Reaction summary cache module.
//!
//! Caches computed reaction summaries under TTL-bounded keys. Entries are
//! never invalidated on write; staleness is bounded only by the TTL.

mod memory_cache;
mod redis_cache;
mod summary_cache;

pub use memory_cache::MemorySummaryCache;
pub use redis_cache::RedisSummaryCache;
pub use summary_cache::{
    summary_cache_from_config, summary_key, CacheError, CacheResult, SummaryCache, SummaryVariant,
};
