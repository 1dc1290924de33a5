//! Reaction entity <-> model mappers

use reactions_core::{Reaction, ReactableRef, ReactionId, TypeAggregates, UserId};

use crate::models::{ReactionModel, TypeAggregatesModel};

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: ReactionId::new(model.id),
            reactable: ReactableRef::new(model.reactable_type, model.reactable_id),
            user_id: UserId::new(model.user_id),
            reaction_type: model.reaction_type,
            value: model.value,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert the grouped aggregate row to the domain read model
impl From<TypeAggregatesModel> for TypeAggregates {
    fn from(model: TypeAggregatesModel) -> Self {
        TypeAggregates {
            reaction_type: model.reaction_type,
            count: model.count,
            sum: model.sum,
            avg: model.avg,
            min: model.min,
            max: model.max,
        }
    }
}
