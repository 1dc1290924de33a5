//! Reaction lifecycle service
//!
//! Handles react, remove, and toggle operations, keeping the denormalized
//! aggregate columns of the reactable in step with the reaction rows.

use reactions_core::{
    AggregateOp, NewReaction, Reactable, ReactableRef, Reaction, ReactionEvent, UserId,
};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// React on an entity
    ///
    /// Idempotent per (user, entity, type): repeating the same reaction
    /// returns the existing row untouched, even when the value differs.
    /// A reaction of a different type by the same user is left alone.
    #[instrument(skip(self))]
    pub async fn react<R: Reactable>(
        &self,
        reactable_id: i64,
        reaction_type: &str,
        value: Option<f64>,
        user: Option<UserId>,
    ) -> ServiceResult<Reaction> {
        let user_id = self.ctx.resolve_reactor(user)?;
        let reactable = ReactableRef::of::<R>(reactable_id);

        if let Some(existing) = self
            .ctx
            .reaction_repo()
            .find_by_user_and_type(&reactable, user_id, reaction_type)
            .await?
        {
            return Ok(existing);
        }

        self.store_reaction::<R>(reactable, user_id, reaction_type, value)
            .await
    }

    /// Remove the user's reaction from an entity, whatever its type
    ///
    /// No-op when the user has no reaction on the entity.
    #[instrument(skip(self))]
    pub async fn remove_reaction<R: Reactable>(
        &self,
        reactable_id: i64,
        user: Option<UserId>,
    ) -> ServiceResult<()> {
        let user_id = self.ctx.resolve_reactor(user)?;
        let reactable = ReactableRef::of::<R>(reactable_id);

        let Some(existing) = self
            .ctx
            .reaction_repo()
            .find_by_user(&reactable, user_id)
            .await?
        else {
            return Ok(());
        };

        self.delete_reaction::<R>(existing).await
    }

    /// Toggle the user's reaction on an entity
    ///
    /// Unlike [`react`](Self::react), toggle considers any existing
    /// reaction by the user regardless of type: the same type switches the
    /// reaction off, a different type is replaced by the requested one,
    /// and no reaction at all creates one. Returns the resulting reaction,
    /// or `None` when toggled off.
    #[instrument(skip(self))]
    pub async fn toggle_reaction<R: Reactable>(
        &self,
        reactable_id: i64,
        reaction_type: &str,
        value: Option<f64>,
        user: Option<UserId>,
    ) -> ServiceResult<Option<Reaction>> {
        let user_id = self.ctx.resolve_reactor(user)?;
        let reactable = ReactableRef::of::<R>(reactable_id);

        match self
            .ctx
            .reaction_repo()
            .find_by_user(&reactable, user_id)
            .await?
        {
            Some(existing) if existing.is_type(reaction_type) => {
                self.delete_reaction::<R>(existing).await?;
                Ok(None)
            }
            Some(existing) => {
                self.delete_reaction::<R>(existing).await?;
                let created = self
                    .store_reaction::<R>(reactable, user_id, reaction_type, value)
                    .await?;
                Ok(Some(created))
            }
            None => {
                let created = self
                    .store_reaction::<R>(reactable, user_id, reaction_type, value)
                    .await?;
                Ok(Some(created))
            }
        }
    }

    /// Check whether the user has reacted on an entity
    ///
    /// Optional type and value filters narrow the check.
    #[instrument(skip(self))]
    pub async fn is_reacted_on<R: Reactable>(
        &self,
        reactable_id: i64,
        reaction_type: Option<&str>,
        value: Option<f64>,
        user: Option<UserId>,
    ) -> ServiceResult<bool> {
        let user_id = self.ctx.resolve_reactor(user)?;
        let reactable = ReactableRef::of::<R>(reactable_id);

        let exists = self
            .ctx
            .reaction_repo()
            .exists(&reactable, user_id, reaction_type, value)
            .await?;

        Ok(exists)
    }

    /// Insert a reaction row, refresh the aggregate column, and emit the
    /// created event
    async fn store_reaction<R: Reactable>(
        &self,
        reactable: ReactableRef,
        user_id: UserId,
        reaction_type: &str,
        value: Option<f64>,
    ) -> ServiceResult<Reaction> {
        let new_reaction = NewReaction::new(reactable, user_id, reaction_type, value);
        let reaction = self.ctx.reaction_repo().create(&new_reaction).await?;

        self.recompute_aggregate::<R>(&reaction.reactable, reaction_type)
            .await?;

        info!(
            reactable = %reaction.reactable,
            user_id = %user_id,
            reaction_type = %reaction_type,
            "Reaction created"
        );

        if let Err(e) = self
            .ctx
            .events()
            .publish(&ReactionEvent::created(&reaction, user_id))
            .await
        {
            warn!(reactable = %reaction.reactable, error = %e, "Failed to publish reaction event");
        }

        Ok(reaction)
    }

    /// Delete a reaction row, refresh the aggregate column, and emit the
    /// removed event
    async fn delete_reaction<R: Reactable>(&self, reaction: Reaction) -> ServiceResult<()> {
        self.ctx.reaction_repo().delete(reaction.id).await?;

        self.recompute_aggregate::<R>(&reaction.reactable, &reaction.reaction_type)
            .await?;

        info!(
            reactable = %reaction.reactable,
            user_id = %reaction.user_id,
            reaction_type = %reaction.reaction_type,
            "Reaction removed"
        );

        if let Err(e) = self
            .ctx
            .events()
            .publish(&ReactionEvent::removed(&reaction, reaction.user_id))
            .await
        {
            warn!(reactable = %reaction.reactable, error = %e, "Failed to publish reaction event");
        }

        Ok(())
    }

    /// Recompute the denormalized aggregate column for a reaction type
    ///
    /// The column is recomputed in full from the current rows rather than
    /// adjusted incrementally, so it self-heals after any drift. Types
    /// without an enabled aggregation rule maintain no column.
    async fn recompute_aggregate<R: Reactable>(
        &self,
        reactable: &ReactableRef,
        reaction_type: &str,
    ) -> ServiceResult<()> {
        let options = R::reaction_options();
        let Some(rule) = options
            .aggregation(reaction_type)
            .filter(|rule| rule.enabled)
        else {
            return Ok(());
        };
        let Some(column) = options.column_name(reaction_type) else {
            return Ok(());
        };

        let computed = self
            .ctx
            .reaction_repo()
            .aggregate(reactable, reaction_type, rule.operation)
            .await?;

        // sum and count collapse to 0 when no rows remain; avg/min/max
        // have no empty-set value and store NULL
        let value = match rule.operation {
            AggregateOp::Sum | AggregateOp::Count => Some(computed.unwrap_or(0.0)),
            AggregateOp::Avg | AggregateOp::Min | AggregateOp::Max => computed,
        };

        if let Err(e) = self
            .ctx
            .reactable_store()
            .update_aggregate(reactable, R::TABLE, &column, value)
            .await
        {
            warn!(
                reactable = %reactable,
                column = %column,
                error = %e,
                "Failed to update aggregate column"
            );
            return Err(e.into());
        }

        Ok(())
    }
}
