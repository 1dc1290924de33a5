//! Tagged reference to a reactable entity
//!
//! A reaction can target any entity type. Instead of runtime type
//! resolution, the target is an explicit (kind, id) pair where `kind` comes
//! from the entity's [`Reactable`](crate::traits::Reactable) implementation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::traits::Reactable;

/// Polymorphic reference to an entity that can receive reactions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactableRef {
    /// Entity kind discriminator, stored in `reactions.reactable_type`
    pub kind: String,
    /// Entity key, stored in `reactions.reactable_id`
    pub id: i64,
}

impl ReactableRef {
    /// Create a reference from raw parts
    pub fn new(kind: impl Into<String>, id: i64) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }

    /// Create a reference to an entity of a known reactable type
    pub fn of<R: Reactable>(id: i64) -> Self {
        Self::new(R::KIND, id)
    }
}

impl fmt::Display for ReactableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
