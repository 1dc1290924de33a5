//! Ports and capabilities the infrastructure layers implement

mod reactable;
mod repositories;
mod session;

pub use reactable::Reactable;
pub use repositories::{ReactableStore, ReactionRepository, RepoResult, UserRepository};
pub use session::{CurrentUserProvider, NoSession};
