//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::UserId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Reactor Resolution Errors
    // =========================================================================
    #[error("Reaction user not defined: pass an explicit user or configure a session provider")]
    UserNotDefined,

    #[error("Invalid reactor: {0}")]
    InvalidReactor(UserId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid reaction type: {0}")]
    InvalidReactionType(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for callers that log or map errors
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotDefined => "USER_NOT_DEFINED",
            Self::InvalidReactor(_) => "INVALID_REACTOR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidReactionType(_) => "INVALID_REACTION_TYPE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a reactor-resolution error (caller input problem)
    pub fn is_reactor_error(&self) -> bool {
        matches!(self, Self::UserNotDefined | Self::InvalidReactor(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidReactionType(_))
    }

    /// Check if this wraps a collaborator failure (database or cache)
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::CacheError(_) | Self::InternalError(_)
        )
    }
}
