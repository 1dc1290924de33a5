//! PostgreSQL implementation of ReactableStore
//!
//! Writes recomputed aggregates into the denormalized `{type}_{operation}`
//! columns that reactable tables may carry.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use reactions_core::traits::{ReactableStore, RepoResult};
use reactions_core::ReactableRef;

use super::error::{ensure_identifier, map_db_error};

/// PostgreSQL implementation of ReactableStore
#[derive(Clone)]
pub struct PgReactableStore {
    pool: PgPool,
}

impl PgReactableStore {
    /// Create a new PgReactableStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactableStore for PgReactableStore {
    #[instrument(skip(self))]
    async fn update_aggregate(
        &self,
        reactable: &ReactableRef,
        table: &str,
        column: &str,
        value: Option<f64>,
    ) -> RepoResult<()> {
        // Table and column names cannot be bound as parameters; they are
        // validated before interpolation.
        ensure_identifier(table)?;
        ensure_identifier(column)?;

        let sql = format!("UPDATE {table} SET {column} = $1 WHERE id = $2");

        sqlx::query(&sql)
            .bind(value)
            .bind(reactable.id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
