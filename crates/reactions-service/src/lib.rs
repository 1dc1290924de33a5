//! # reactions-service
//!
//! Application layer for the reactions package. Orchestrates the domain
//! ports from `reactions-core` to implement the reaction lifecycle
//! (react, remove, toggle), summary computation with caching, and the
//! relationship read paths.

pub mod services;

pub use services::{
    ReactableService, ReactionService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
