//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use reactions_core::traits::{ReactionRepository, RepoResult};
use reactions_core::{
    AggregateOp, NewReaction, Reaction, ReactableRef, ReactionId, TypeAggregates, UserId,
};

use crate::models::{ReactionModel, TypeAggregatesModel};

use super::error::map_db_error;

const REACTION_COLUMNS: &str =
    "id, reactable_type, reactable_id, user_id, type, value, created_at, updated_at";

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find_by_user_and_type(
        &self,
        reactable: &ReactableRef,
        user_id: UserId,
        reaction_type: &str,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(&format!(
            r"
            SELECT {REACTION_COLUMNS}
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND user_id = $3 AND type = $4
            ORDER BY id
            LIMIT 1
            "
        ))
        .bind(&reactable.kind)
        .bind(reactable.id)
        .bind(user_id.into_inner())
        .bind(reaction_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        reactable: &ReactableRef,
        user_id: UserId,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(&format!(
            r"
            SELECT {REACTION_COLUMNS}
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND user_id = $3
            ORDER BY id
            LIMIT 1
            "
        ))
        .bind(&reactable.kind)
        .bind(reactable.id)
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn find_by_reactable(&self, reactable: &ReactableRef) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(&format!(
            r"
            SELECT {REACTION_COLUMNS}
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2
            ORDER BY id
            "
        ))
        .bind(&reactable.kind)
        .bind(reactable.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn exists(
        &self,
        reactable: &ReactableRef,
        user_id: UserId,
        reaction_type: Option<&str>,
        value: Option<f64>,
    ) -> RepoResult<bool> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT EXISTS (SELECT 1 FROM reactions WHERE reactable_type = ",
        );
        query.push_bind(&reactable.kind);
        query.push(" AND reactable_id = ").push_bind(reactable.id);
        query
            .push(" AND user_id = ")
            .push_bind(user_id.into_inner());

        if let Some(reaction_type) = reaction_type {
            query.push(" AND type = ").push_bind(reaction_type);
        }
        if let Some(value) = value {
            query.push(" AND value = ").push_bind(value);
        }
        query.push(")");

        let exists: bool = query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, reaction))]
    async fn create(&self, reaction: &NewReaction) -> RepoResult<Reaction> {
        let model = sqlx::query_as::<_, ReactionModel>(&format!(
            r"
            INSERT INTO reactions (reactable_type, reactable_id, user_id, type, value)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REACTION_COLUMNS}
            "
        ))
        .bind(&reaction.reactable.kind)
        .bind(reaction.reactable.id)
        .bind(reaction.user_id.into_inner())
        .bind(&reaction.reaction_type)
        .bind(reaction.value)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Reaction::from(model))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ReactionId) -> RepoResult<()> {
        sqlx::query("DELETE FROM reactions WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn aggregate(
        &self,
        reactable: &ReactableRef,
        reaction_type: &str,
        op: AggregateOp,
    ) -> RepoResult<Option<f64>> {
        // count aggregates over row ids, the rest over the value column
        let expression = match op {
            AggregateOp::Count => "COUNT(id)::double precision",
            AggregateOp::Sum => "SUM(value)",
            AggregateOp::Avg => "AVG(value)",
            AggregateOp::Min => "MIN(value)",
            AggregateOp::Max => "MAX(value)",
        };

        let result = sqlx::query_scalar::<_, Option<f64>>(&format!(
            r"
            SELECT {expression}
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND type = $3
            "
        ))
        .bind(&reactable.kind)
        .bind(reactable.id)
        .bind(reaction_type)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn type_aggregates(&self, reactable: &ReactableRef) -> RepoResult<Vec<TypeAggregates>> {
        let results = sqlx::query_as::<_, TypeAggregatesModel>(
            r"
            SELECT type,
                   COUNT(id) AS count,
                   SUM(value) AS sum,
                   AVG(value) AS avg,
                   MIN(value) AS min,
                   MAX(value) AS max
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2
            GROUP BY type
            ORDER BY type
            ",
        )
        .bind(&reactable.kind)
        .bind(reactable.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(TypeAggregates::from).collect())
    }

    #[instrument(skip(self))]
    async fn reacting_user_ids(&self, reactable: &ReactableRef) -> RepoResult<Vec<UserId>> {
        let results = sqlx::query_scalar::<_, i64>(
            r"
            SELECT DISTINCT user_id
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2
            ORDER BY user_id
            ",
        )
        .bind(&reactable.kind)
        .bind(reactable.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(UserId::new).collect())
    }

    #[instrument(skip(self))]
    async fn reacted_entity_ids(
        &self,
        kind: &str,
        user_id: UserId,
        reaction_type: Option<&str>,
    ) -> RepoResult<Vec<i64>> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT DISTINCT reactable_id FROM reactions WHERE reactable_type = ",
        );
        query.push_bind(kind);
        query
            .push(" AND user_id = ")
            .push_bind(user_id.into_inner());

        if let Some(reaction_type) = reaction_type {
            query.push(" AND type = ").push_bind(reaction_type);
        }
        query.push(" ORDER BY reactable_id");

        let ids: Vec<i64> = query
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(ids)
    }
}
