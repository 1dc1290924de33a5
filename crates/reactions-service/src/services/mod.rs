//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! reactor resolution, reaction lifecycle orchestration, aggregate
//! recomputation, and cached summaries.

pub mod context;
pub mod error;
pub mod reactable;
pub mod reaction;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reactable::ReactableService;
pub use reaction::ReactionService;
