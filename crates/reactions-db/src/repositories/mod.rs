//! Repository implementations
//!
//! PostgreSQL implementations of the ports defined in reactions-core.

mod error;
mod reactable;
mod reaction;
mod user;

pub use reactable::PgReactableStore;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
