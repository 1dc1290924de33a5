//! Value objects - immutable types that represent domain concepts

mod ids;
mod reactable_ref;

pub use ids::{ReactionId, UserId};
pub use reactable_ref::ReactableRef;
