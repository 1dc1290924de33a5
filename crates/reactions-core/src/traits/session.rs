//! Current-user adapter
//!
//! Operations that need a reactor take an explicit `Option<UserId>`. When the
//! caller passes none, the service falls back to this adapter, supplied at
//! the call site closest to the request boundary (web session, CLI flag,
//! test fixture). There is no ambient global.

use crate::value_objects::UserId;

/// Source of the "currently authenticated user", if any
pub trait CurrentUserProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}

/// Adapter for contexts without a session; every fallback resolves to no user
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSession;

impl CurrentUserProvider for NoSession {
    fn current_user(&self) -> Option<UserId> {
        None
    }
}
