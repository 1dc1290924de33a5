//! Database models - SQLx-compatible structs for PostgreSQL tables

mod reaction;
mod user;

pub use reaction::{ReactionModel, TypeAggregatesModel};
pub use user::UserModel;
