//! Reactable read-side service
//!
//! Summaries (cached), loaded-collection summaries, and the relationship
//! queries between reactables and the users who reacted on them.

use reactions_cache::{summary_key, SummaryVariant};
use reactions_core::{
    summarize_loaded, Reactable, ReactableRef, Reaction, ReactionSummary, User, UserId,
};
use tracing::{instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reactable service
pub struct ReactableService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactableService<'a> {
    /// Create a new ReactableService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Summary of an entity's reactions, one aggregate per reaction type
    ///
    /// Computed by the database in a single grouped query. Served from the
    /// cache within the TTL when caching is enabled; nothing invalidates
    /// the entry on write, so a result may lag the rows by up to the TTL.
    #[instrument(skip(self))]
    pub async fn reaction_summary<R: Reactable>(
        &self,
        reactable_id: i64,
    ) -> ServiceResult<ReactionSummary> {
        let reactable = ReactableRef::of::<R>(reactable_id);
        let key = summary_key(SummaryVariant::Query, &reactable);

        if let Some(cached) = self.cache_get(&key).await {
            return Ok(cached);
        }

        let options = R::reaction_options();
        let rows = self.ctx.reaction_repo().type_aggregates(&reactable).await?;

        let summary: ReactionSummary = rows
            .into_iter()
            .map(|row| {
                let op = options.summary_operation(&row.reaction_type);
                let value = row.select(op);
                (row.reaction_type, value)
            })
            .collect();

        self.cache_put(&key, &summary).await;

        Ok(summary)
    }

    /// Summary computed in-process from the entity's loaded reactions
    ///
    /// Produces the same mapping as [`reaction_summary`](Self::reaction_summary)
    /// but aggregates in memory after loading the rows. Cached under its
    /// own key so the two paths never serve each other's entries.
    #[instrument(skip(self))]
    pub async fn reaction_summary_loaded<R: Reactable>(
        &self,
        reactable_id: i64,
    ) -> ServiceResult<ReactionSummary> {
        let reactable = ReactableRef::of::<R>(reactable_id);
        let key = summary_key(SummaryVariant::Loaded, &reactable);

        if let Some(cached) = self.cache_get(&key).await {
            return Ok(cached);
        }

        let reactions = self.ctx.reaction_repo().find_by_reactable(&reactable).await?;
        let summary = summarize_loaded(&R::reaction_options(), &reactions);

        self.cache_put(&key, &summary).await;

        Ok(summary)
    }

    /// All reactions on an entity
    #[instrument(skip(self))]
    pub async fn reactions<R: Reactable>(
        &self,
        reactable_id: i64,
    ) -> ServiceResult<Vec<Reaction>> {
        let reactable = ReactableRef::of::<R>(reactable_id);
        let reactions = self.ctx.reaction_repo().find_by_reactable(&reactable).await?;
        Ok(reactions)
    }

    /// Users who reacted on an entity
    #[instrument(skip(self))]
    pub async fn reactions_by<R: Reactable>(&self, reactable_id: i64) -> ServiceResult<Vec<User>> {
        let reactable = ReactableRef::of::<R>(reactable_id);
        let user_ids = self.ctx.reaction_repo().reacting_user_ids(&reactable).await?;
        let users = self.ctx.user_repo().find_by_ids(&user_ids).await?;
        Ok(users)
    }

    /// The resolved user's reaction on an entity, if any
    #[instrument(skip(self))]
    pub async fn reacted<R: Reactable>(
        &self,
        reactable_id: i64,
        user: Option<UserId>,
    ) -> ServiceResult<Option<Reaction>> {
        let user_id = self.ctx.resolve_reactor(user)?;
        let reactable = ReactableRef::of::<R>(reactable_id);

        let reaction = self.ctx.reaction_repo().find_by_user(&reactable, user_id).await?;
        Ok(reaction)
    }

    /// Check whether a user has reacted on an entity, optionally narrowed
    /// to one reaction type
    #[instrument(skip(self))]
    pub async fn is_react_by<R: Reactable>(
        &self,
        reactable_id: i64,
        user: Option<UserId>,
        reaction_type: Option<&str>,
    ) -> ServiceResult<bool> {
        let user_id = self.ctx.resolve_reactor(user)?;
        let reactable = ReactableRef::of::<R>(reactable_id);

        let exists = self
            .ctx
            .reaction_repo()
            .exists(&reactable, user_id, reaction_type, None)
            .await?;

        Ok(exists)
    }

    /// Ids of entities of one kind the user reacted on, optionally
    /// restricted to a reaction type
    #[instrument(skip(self))]
    pub async fn where_reacted_by<R: Reactable>(
        &self,
        user: Option<UserId>,
        reaction_type: Option<&str>,
    ) -> ServiceResult<Vec<i64>> {
        let user_id = self.ctx.resolve_reactor(user)?;

        let ids = self
            .ctx
            .reaction_repo()
            .reacted_entity_ids(R::KIND, user_id, reaction_type)
            .await?;

        Ok(ids)
    }

    /// Cache lookup; a miss, a disabled cache, and a cache failure all
    /// fall through to recomputation
    async fn cache_get(&self, key: &str) -> Option<ReactionSummary> {
        if !self.ctx.cache_config().enabled {
            return None;
        }

        match self.ctx.summary_cache().get(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(key = %key, error = %e, "Summary cache read failed");
                None
            }
        }
    }

    /// Best-effort cache write under the configured TTL
    async fn cache_put(&self, key: &str, summary: &ReactionSummary) {
        if !self.ctx.cache_config().enabled {
            return;
        }

        let ttl = self.ctx.cache_config().ttl_seconds;
        if let Err(e) = self.ctx.summary_cache().put(key, summary, ttl).await {
            warn!(key = %key, error = %e, "Summary cache write failed");
        }
    }
}
