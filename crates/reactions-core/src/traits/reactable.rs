//! Reactable capability
//!
//! An entity type opts into receiving reactions by implementing this trait.
//! The aggregation policy is resolved through the trait at compile time
//! instead of a runtime registry lookup.

use crate::aggregation::ReactionOptions;

/// Capability of an entity type to receive reactions
pub trait Reactable {
    /// Discriminator stored in `reactions.reactable_type`
    const KIND: &'static str;

    /// Table carrying the entity rows and its denormalized
    /// `{type}_{operation}` aggregate columns
    const TABLE: &'static str;

    /// Static aggregation policy: reaction type -> rule
    fn reaction_options() -> ReactionOptions;
}
