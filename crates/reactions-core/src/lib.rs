//! # reactions-core
//!
//! Domain layer containing entities, value objects, the aggregation policy,
//! repository ports, and domain events.
//! This crate has zero dependencies on infrastructure (database, cache, etc.).

pub mod aggregation;
pub mod entities;
pub mod error;
pub mod events;
pub mod summary;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use aggregation::{AggregateOp, AggregateOpParseError, AggregationRule, ReactionOptions};
pub use entities::{NewReaction, Reaction, TypeAggregates, User};
pub use error::DomainError;
pub use events::{ReactionEvent, ReactionEventBody, ReactionEventSink};
pub use summary::{summarize_loaded, ReactionSummary};
pub use traits::{
    CurrentUserProvider, NoSession, Reactable, ReactableStore, ReactionRepository, RepoResult,
    UserRepository,
};
pub use value_objects::{ReactableRef, ReactionId, UserId};
