//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub reactable_type: String,
    pub reactable_id: i64,
    pub user_id: i64,
    #[sqlx(rename = "type")]
    pub reaction_type: String,
    pub value: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-type aggregate row from the grouped summary query
#[derive(Debug, Clone, FromRow)]
pub struct TypeAggregatesModel {
    #[sqlx(rename = "type")]
    pub reaction_type: String,
    pub count: i64,
    pub sum: Option<f64>,
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}
