//! Reaction domain events
//!
//! Emitted on every reaction create/delete and handed to an external sink
//! (pub/sub channel, listener queue). Consumers are outside this package.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Reaction;
use crate::error::DomainError;
use crate::value_objects::{ReactableRef, UserId};

/// Events around the reaction lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionEvent {
    ReactionCreated(ReactionEventBody),
    ReactionRemoved(ReactionEventBody),
}

/// Payload shared by both event kinds: the reactable, the reaction row as it
/// was created/deleted, and the acting user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionEventBody {
    pub reactable: ReactableRef,
    pub reaction: Reaction,
    pub user_id: UserId,
    pub timestamp: DateTime<Utc>,
}

impl ReactionEvent {
    /// Build a "reaction created" event
    #[must_use]
    pub fn created(reaction: &Reaction, user_id: UserId) -> Self {
        Self::ReactionCreated(ReactionEventBody::new(reaction, user_id))
    }

    /// Build a "reaction removed" event
    #[must_use]
    pub fn removed(reaction: &Reaction, user_id: UserId) -> Self {
        Self::ReactionRemoved(ReactionEventBody::new(reaction, user_id))
    }

    /// Get the event type name
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionCreated(_) => "REACTION_CREATED",
            Self::ReactionRemoved(_) => "REACTION_REMOVED",
        }
    }

    /// The reactable the event concerns
    #[must_use]
    pub fn reactable(&self) -> &ReactableRef {
        match self {
            Self::ReactionCreated(body) | Self::ReactionRemoved(body) => &body.reactable,
        }
    }

    /// Get the timestamp of the event
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ReactionCreated(body) | Self::ReactionRemoved(body) => body.timestamp,
        }
    }
}

impl ReactionEventBody {
    fn new(reaction: &Reaction, user_id: UserId) -> Self {
        Self {
            reactable: reaction.reactable.clone(),
            reaction: reaction.clone(),
            user_id,
            timestamp: Utc::now(),
        }
    }
}

/// Outbound port for reaction events
#[async_trait]
pub trait ReactionEventSink: Send + Sync {
    /// Deliver one event; the caller treats delivery as best-effort
    async fn publish(&self, event: &ReactionEvent) -> Result<(), DomainError>;
}
