//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::aggregation::AggregateOp;
use crate::entities::{NewReaction, Reaction, TypeAggregates, User};
use crate::error::DomainError;
use crate::value_objects::{ReactableRef, ReactionId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the reaction by a user on a reactable with a specific type
    async fn find_by_user_and_type(
        &self,
        reactable: &ReactableRef,
        user_id: UserId,
        reaction_type: &str,
    ) -> RepoResult<Option<Reaction>>;

    /// Find the first reaction by a user on a reactable, regardless of type
    async fn find_by_user(
        &self,
        reactable: &ReactableRef,
        user_id: UserId,
    ) -> RepoResult<Option<Reaction>>;

    /// All reactions on a reactable
    async fn find_by_reactable(&self, reactable: &ReactableRef) -> RepoResult<Vec<Reaction>>;

    /// Existence check with optional type and value filters
    async fn exists(
        &self,
        reactable: &ReactableRef,
        user_id: UserId,
        reaction_type: Option<&str>,
        value: Option<f64>,
    ) -> RepoResult<bool>;

    /// Insert a reaction row; the database assigns id and timestamps
    async fn create(&self, reaction: &NewReaction) -> RepoResult<Reaction>;

    /// Delete a reaction row
    async fn delete(&self, id: ReactionId) -> RepoResult<()>;

    /// Single aggregate over the current rows of one (reactable, type) pair
    ///
    /// `count` aggregates over row ids and is never NULL; the value-based
    /// operations return `None` when no row carries a value.
    async fn aggregate(
        &self,
        reactable: &ReactableRef,
        reaction_type: &str,
        op: AggregateOp,
    ) -> RepoResult<Option<f64>>;

    /// Per-type aggregates over all reactions on a reactable, one row per
    /// reaction type present
    async fn type_aggregates(&self, reactable: &ReactableRef) -> RepoResult<Vec<TypeAggregates>>;

    /// Distinct ids of users who reacted on a reactable
    async fn reacting_user_ids(&self, reactable: &ReactableRef) -> RepoResult<Vec<UserId>>;

    /// Ids of entities of a kind having at least one reaction by the user,
    /// optionally restricted to a reaction type
    async fn reacted_entity_ids(
        &self,
        kind: &str,
        user_id: UserId,
        reaction_type: Option<&str>,
    ) -> RepoResult<Vec<i64>>;
}

// ============================================================================
// Reactable Store
// ============================================================================

/// Write access to the denormalized aggregate columns on reactable tables
#[async_trait]
pub trait ReactableStore: Send + Sync {
    /// Persist a recomputed aggregate into `{table}.{column}` for the entity
    ///
    /// `None` writes NULL (no rows carry a value for the aggregated type).
    async fn update_aggregate(
        &self,
        reactable: &ReactableRef,
        table: &str,
        column: &str,
        value: Option<f64>,
    ) -> RepoResult<()>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load users by key, for the "who reacted" read path
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>>;
}
