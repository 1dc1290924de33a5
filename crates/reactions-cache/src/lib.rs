//! # reactions-cache
//!
//! Redis layer for the reactions package: summary caching and reaction
//! event publishing.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Summary Cache**: get/put of computed reaction summaries with TTL,
//!   selectable by driver name (`redis` or in-process `memory`)
//! - **Event Publishing**: reaction created/removed events over Redis pub/sub
//!
//! ## Example
//!
//! ```ignore
//! use reactions_cache::{summary_cache_from_config, RedisEventPublisher, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let cache = summary_cache_from_config(&config.summary_cache, &pool)?;
//! let publisher = RedisEventPublisher::new(pool.clone());
//! ```

pub mod events;
pub mod pool;
pub mod summary;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export summary cache types
pub use summary::{
    summary_cache_from_config, summary_key, CacheError, CacheResult, MemorySummaryCache,
    RedisSummaryCache, SummaryCache, SummaryVariant,
};

// Re-export event publishing types
pub use events::{reaction_channel, RedisEventPublisher};
