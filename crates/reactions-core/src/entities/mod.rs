//! Domain entities - core business objects

mod reaction;
mod user;

pub use reaction::{NewReaction, Reaction, TypeAggregates};
pub use user::User;
