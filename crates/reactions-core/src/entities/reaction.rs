//! Reaction entity - a typed reaction by one user on one reactable entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregation::AggregateOp;
use crate::value_objects::{ReactableRef, ReactionId, UserId};

/// Reaction entity
///
/// Rows are created and deleted, never updated in place. A type switch under
/// toggle semantics is a delete followed by a fresh insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: ReactionId,
    pub reactable: ReactableRef,
    pub user_id: UserId,
    pub reaction_type: String,
    /// Optional numeric payload (vote weight, star rating)
    pub value: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    /// Check if the reaction has a specific type
    #[inline]
    pub fn is_type(&self, reaction_type: &str) -> bool {
        self.reaction_type == reaction_type
    }
}

/// Data for a reaction row about to be inserted (id and timestamps are
/// assigned by the database)
#[derive(Debug, Clone, PartialEq)]
pub struct NewReaction {
    pub reactable: ReactableRef,
    pub user_id: UserId,
    pub reaction_type: String,
    pub value: Option<f64>,
}

impl NewReaction {
    /// Create a new pending reaction
    pub fn new(
        reactable: ReactableRef,
        user_id: UserId,
        reaction_type: impl Into<String>,
        value: Option<f64>,
    ) -> Self {
        Self {
            reactable,
            user_id,
            reaction_type: reaction_type.into(),
            value,
        }
    }
}

/// All aggregate values for one reaction type on one reactable, as returned
/// by the grouped summary query
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAggregates {
    pub reaction_type: String,
    pub count: i64,
    pub sum: Option<f64>,
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl TypeAggregates {
    /// Pick the aggregate matching an operation
    ///
    /// `sum` over zero value-carrying rows is 0; `avg`/`min`/`max` have no
    /// meaningful empty-set value and also collapse to 0 here, since a type
    /// only appears in the grouped result when at least one row exists.
    #[must_use]
    pub fn select(&self, op: AggregateOp) -> f64 {
        match op {
            AggregateOp::Count => self.count as f64,
            AggregateOp::Sum => self.sum.unwrap_or(0.0),
            AggregateOp::Avg => self.avg.unwrap_or(0.0),
            AggregateOp::Min => self.min.unwrap_or(0.0),
            AggregateOp::Max => self.max.unwrap_or(0.0),
        }
    }
}
