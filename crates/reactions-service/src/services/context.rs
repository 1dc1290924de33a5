//! Service context - dependency container for services
//!
//! Holds the repositories, summary cache, event sink, and current-user
//! adapter needed by the services.

use std::sync::Arc;

use reactions_cache::{summary_cache_from_config, RedisEventPublisher, RedisPool, SummaryCache};
use reactions_common::{AppConfig, SummaryCacheConfig};
use reactions_core::{
    CurrentUserProvider, DomainError, NoSession, ReactableStore, ReactionEventSink,
    ReactionRepository, UserId, UserRepository,
};
use reactions_db::{PgPool, PgReactableStore, PgReactionRepository, PgUserRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The summary cache and its configuration
/// - The reaction event sink
/// - The current-user adapter for reactor fallback
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    reaction_repo: Arc<dyn ReactionRepository>,
    user_repo: Arc<dyn UserRepository>,
    reactable_store: Arc<dyn ReactableStore>,

    // Summary cache
    summary_cache: Arc<dyn SummaryCache>,
    cache_config: SummaryCacheConfig,

    // Events
    events: Arc<dyn ReactionEventSink>,

    // Current-user fallback
    session: Arc<dyn CurrentUserProvider>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        reaction_repo: Arc<dyn ReactionRepository>,
        user_repo: Arc<dyn UserRepository>,
        reactable_store: Arc<dyn ReactableStore>,
        summary_cache: Arc<dyn SummaryCache>,
        cache_config: SummaryCacheConfig,
        events: Arc<dyn ReactionEventSink>,
        session: Arc<dyn CurrentUserProvider>,
    ) -> Self {
        Self {
            reaction_repo,
            user_repo,
            reactable_store,
            summary_cache,
            cache_config,
            events,
            session,
        }
    }

    /// Wire a context from concrete PostgreSQL and Redis infrastructure
    ///
    /// Uses the configured summary cache driver, publishes events over
    /// Redis pub/sub, and has no current-user fallback.
    pub fn from_infrastructure(
        pool: PgPool,
        redis_pool: RedisPool,
        config: &AppConfig,
    ) -> ServiceResult<Self> {
        let summary_cache = summary_cache_from_config(&config.summary_cache, &redis_pool)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(Self::new(
            Arc::new(PgReactionRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgReactableStore::new(pool)),
            summary_cache,
            config.summary_cache.clone(),
            Arc::new(RedisEventPublisher::new(redis_pool)),
            Arc::new(NoSession),
        ))
    }

    // === Repositories ===

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the reactable aggregate column store
    pub fn reactable_store(&self) -> &dyn ReactableStore {
        self.reactable_store.as_ref()
    }

    // === Summary cache ===

    /// Get the summary cache
    pub fn summary_cache(&self) -> &dyn SummaryCache {
        self.summary_cache.as_ref()
    }

    /// Get the summary cache configuration
    pub fn cache_config(&self) -> &SummaryCacheConfig {
        &self.cache_config
    }

    // === Events ===

    /// Get the reaction event sink
    pub fn events(&self) -> &dyn ReactionEventSink {
        self.events.as_ref()
    }

    // === Reactor resolution ===

    /// Resolve the acting user for a reaction operation
    ///
    /// An explicit user is validated; with no explicit user the
    /// current-user adapter is consulted. No user from either source is
    /// a `UserNotDefined` error.
    pub fn resolve_reactor(&self, user: Option<UserId>) -> Result<UserId, DomainError> {
        match user {
            Some(id) if id.is_valid() => Ok(id),
            Some(id) => Err(DomainError::InvalidReactor(id)),
            None => self
                .session
                .current_user()
                .ok_or(DomainError::UserNotDefined),
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("cache_config", &self.cache_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    reactable_store: Option<Arc<dyn ReactableStore>>,
    summary_cache: Option<Arc<dyn SummaryCache>>,
    cache_config: Option<SummaryCacheConfig>,
    events: Option<Arc<dyn ReactionEventSink>>,
    session: Option<Arc<dyn CurrentUserProvider>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            reaction_repo: None,
            user_repo: None,
            reactable_store: None,
            summary_cache: None,
            cache_config: None,
            events: None,
            session: None,
        }
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn reactable_store(mut self, store: Arc<dyn ReactableStore>) -> Self {
        self.reactable_store = Some(store);
        self
    }

    pub fn summary_cache(mut self, cache: Arc<dyn SummaryCache>) -> Self {
        self.summary_cache = Some(cache);
        self
    }

    pub fn cache_config(mut self, config: SummaryCacheConfig) -> Self {
        self.cache_config = Some(config);
        self
    }

    pub fn events(mut self, events: Arc<dyn ReactionEventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn session(mut self, session: Arc<dyn CurrentUserProvider>) -> Self {
        self.session = Some(session);
        self
    }

    /// Build the ServiceContext
    ///
    /// The cache configuration defaults and the session defaults to no
    /// current user; everything else is required.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.reactable_store
                .ok_or_else(|| ServiceError::validation("reactable_store is required"))?,
            self.summary_cache
                .ok_or_else(|| ServiceError::validation("summary_cache is required"))?,
            self.cache_config.unwrap_or_default(),
            self.events
                .ok_or_else(|| ServiceError::validation("events is required"))?,
            self.session.unwrap_or_else(|| Arc::new(NoSession)),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
