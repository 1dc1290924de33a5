//! Redis Pub/Sub publisher for reaction lifecycle events.
//!
//! Events are published to a per-reactable channel so subscribers can
//! follow a single entity without filtering a global stream.

use async_trait::async_trait;
use redis::AsyncCommands;

use reactions_core::{DomainError, ReactableRef, ReactionEvent, ReactionEventSink};

use crate::pool::RedisPool;

/// Channel name for a reactable's event stream
#[must_use]
pub fn reaction_channel(reactable: &ReactableRef) -> String {
    format!("reactions:{}:{}", reactable.kind, reactable.id)
}

/// Publishes reaction events to Redis channels
#[derive(Debug, Clone)]
pub struct RedisEventPublisher {
    pool: RedisPool,
}

impl RedisEventPublisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionEventSink for RedisEventPublisher {
    async fn publish(&self, event: &ReactionEvent) -> Result<(), DomainError> {
        let channel = reaction_channel(event.reactable());
        let payload =
            serde_json::to_string(event).map_err(|e| DomainError::InternalError(e.to_string()))?;

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))?;

        let receivers: u32 = conn
            .publish(&channel, &payload)
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))?;

        tracing::debug!(
            channel = %channel,
            event_type = %event.event_type(),
            receivers = receivers,
            "Published reaction event"
        );

        Ok(())
    }
}
