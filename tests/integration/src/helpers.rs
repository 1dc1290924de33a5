//! In-memory implementations of the domain ports
//!
//! These mirror the semantics of the PostgreSQL repositories closely
//! enough to exercise the services: aggregate functions ignore missing
//! values, `count` counts rows, and result orderings follow ids.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use reactions_cache::MemorySummaryCache;
use reactions_common::SummaryCacheConfig;
use reactions_core::{
    AggregateOp, CurrentUserProvider, NewReaction, Reactable, ReactableRef, ReactableStore,
    Reaction, ReactionEvent, ReactionEventSink, ReactionId, ReactionRepository, RepoResult,
    TypeAggregates, User, UserId, UserRepository,
};
use reactions_core::DomainError;
use reactions_service::{ServiceContext, ServiceContextBuilder};

/// In-memory reaction repository
#[derive(Default)]
pub struct MemoryReactionRepository {
    rows: Mutex<Vec<Reaction>>,
    next_id: AtomicI64,
}

impl MemoryReactionRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored reaction rows
    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }

    fn matching(&self, reactable: &ReactableRef, reaction_type: Option<&str>) -> Vec<Reaction> {
        self.rows
            .lock()
            .iter()
            .filter(|r| &r.reactable == reactable)
            .filter(|r| reaction_type.is_none_or(|t| r.reaction_type == t))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ReactionRepository for MemoryReactionRepository {
    async fn find_by_user_and_type(
        &self,
        reactable: &ReactableRef,
        user_id: UserId,
        reaction_type: &str,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self
            .matching(reactable, Some(reaction_type))
            .into_iter()
            .find(|r| r.user_id == user_id))
    }

    async fn find_by_user(
        &self,
        reactable: &ReactableRef,
        user_id: UserId,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self
            .matching(reactable, None)
            .into_iter()
            .find(|r| r.user_id == user_id))
    }

    async fn find_by_reactable(&self, reactable: &ReactableRef) -> RepoResult<Vec<Reaction>> {
        Ok(self.matching(reactable, None))
    }

    async fn exists(
        &self,
        reactable: &ReactableRef,
        user_id: UserId,
        reaction_type: Option<&str>,
        value: Option<f64>,
    ) -> RepoResult<bool> {
        Ok(self
            .matching(reactable, reaction_type)
            .iter()
            .any(|r| r.user_id == user_id && value.is_none_or(|v| r.value == Some(v))))
    }

    async fn create(&self, reaction: &NewReaction) -> RepoResult<Reaction> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let row = Reaction {
            id: ReactionId::new(id),
            reactable: reaction.reactable.clone(),
            user_id: reaction.user_id,
            reaction_type: reaction.reaction_type.clone(),
            value: reaction.value,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().push(row.clone());
        Ok(row)
    }

    async fn delete(&self, id: ReactionId) -> RepoResult<()> {
        self.rows.lock().retain(|r| r.id != id);
        Ok(())
    }

    async fn aggregate(
        &self,
        reactable: &ReactableRef,
        reaction_type: &str,
        op: AggregateOp,
    ) -> RepoResult<Option<f64>> {
        let rows = self.matching(reactable, Some(reaction_type));
        if op == AggregateOp::Count {
            return Ok(Some(rows.len() as f64));
        }

        let present: Vec<f64> = rows.iter().filter_map(|r| r.value).collect();
        if present.is_empty() {
            return Ok(None);
        }

        let sum: f64 = present.iter().sum();
        Ok(Some(match op {
            AggregateOp::Sum => sum,
            AggregateOp::Avg => sum / present.len() as f64,
            AggregateOp::Min => present.iter().copied().fold(f64::INFINITY, f64::min),
            AggregateOp::Max => present.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            AggregateOp::Count => unreachable!(),
        }))
    }

    async fn type_aggregates(&self, reactable: &ReactableRef) -> RepoResult<Vec<TypeAggregates>> {
        let mut groups: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
        for row in self.matching(reactable, None) {
            groups.entry(row.reaction_type).or_default().push(row.value);
        }

        Ok(groups
            .into_iter()
            .map(|(reaction_type, values)| {
                let present: Vec<f64> = values.iter().copied().flatten().collect();
                let sum: f64 = present.iter().sum();
                TypeAggregates {
                    reaction_type,
                    count: values.len() as i64,
                    sum: (!present.is_empty()).then_some(sum),
                    avg: (!present.is_empty()).then(|| sum / present.len() as f64),
                    min: present.iter().copied().reduce(f64::min),
                    max: present.iter().copied().reduce(f64::max),
                }
            })
            .collect())
    }

    async fn reacting_user_ids(&self, reactable: &ReactableRef) -> RepoResult<Vec<UserId>> {
        let ids: BTreeSet<i64> = self
            .matching(reactable, None)
            .iter()
            .map(|r| r.user_id.into_inner())
            .collect();
        Ok(ids.into_iter().map(UserId::new).collect())
    }

    async fn reacted_entity_ids(
        &self,
        kind: &str,
        user_id: UserId,
        reaction_type: Option<&str>,
    ) -> RepoResult<Vec<i64>> {
        let ids: BTreeSet<i64> = self
            .rows
            .lock()
            .iter()
            .filter(|r| r.reactable.kind == kind && r.user_id == user_id)
            .filter(|r| reaction_type.is_none_or(|t| r.reaction_type == t))
            .map(|r| r.reactable.id)
            .collect();
        Ok(ids.into_iter().collect())
    }
}

/// In-memory store for the denormalized aggregate columns
#[derive(Default)]
pub struct MemoryReactableStore {
    columns: Mutex<HashMap<(String, String, i64), Option<f64>>>,
}

impl MemoryReactableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written to `{table}.{column}` for an entity, if the
    /// column was ever written
    pub fn column(&self, table: &str, column: &str, id: i64) -> Option<Option<f64>> {
        self.columns
            .lock()
            .get(&(table.to_string(), column.to_string(), id))
            .copied()
    }
}

#[async_trait]
impl ReactableStore for MemoryReactableStore {
    async fn update_aggregate(
        &self,
        reactable: &ReactableRef,
        table: &str,
        column: &str,
        value: Option<f64>,
    ) -> RepoResult<()> {
        self.columns
            .lock()
            .insert((table.to_string(), column.to_string(), reactable.id), value);
        Ok(())
    }
}

/// In-memory user repository
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users.lock().push(user);
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect();
        users.sort_by_key(|u| u.id.into_inner());
        Ok(users)
    }
}

/// Event sink that records every published event
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<ReactionEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReactionEvent> {
        self.events.lock().clone()
    }

    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(ReactionEvent::event_type).collect()
    }
}

#[async_trait]
impl ReactionEventSink for RecordingEventSink {
    async fn publish(&self, event: &ReactionEvent) -> Result<(), DomainError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

/// Event sink whose publishes always fail
pub struct FailingEventSink;

#[async_trait]
impl ReactionEventSink for FailingEventSink {
    async fn publish(&self, _event: &ReactionEvent) -> Result<(), DomainError> {
        Err(DomainError::CacheError("publisher offline".to_string()))
    }
}

/// Current-user adapter returning a fixed user
pub struct FixedSession {
    user: Option<UserId>,
}

impl FixedSession {
    pub fn new(user: Option<UserId>) -> Self {
        Self { user }
    }
}

impl CurrentUserProvider for FixedSession {
    fn current_user(&self) -> Option<UserId> {
        self.user
    }
}

/// Fully wired test environment over the in-memory fakes
pub struct TestEnv {
    pub ctx: ServiceContext,
    pub reactions: Arc<MemoryReactionRepository>,
    pub users: Arc<MemoryUserRepository>,
    pub store: Arc<MemoryReactableStore>,
    pub events: Arc<RecordingEventSink>,
}

impl TestEnv {
    /// Environment with caching enabled under the default 60s TTL and no
    /// session user
    pub fn new() -> Self {
        Self::build(SummaryCacheConfig::default(), None)
    }

    /// Environment with a custom summary cache configuration
    pub fn with_cache_config(cache_config: SummaryCacheConfig) -> Self {
        Self::build(cache_config, None)
    }

    /// Environment whose current-user adapter resolves to the given user
    pub fn with_session(user_id: UserId) -> Self {
        Self::build(SummaryCacheConfig::default(), Some(user_id))
    }

    /// Environment whose event sink rejects every publish
    pub fn with_failing_events() -> Self {
        Self::build_with_sink(
            SummaryCacheConfig::default(),
            None,
            Some(Arc::new(FailingEventSink)),
        )
    }

    fn build(cache_config: SummaryCacheConfig, session_user: Option<UserId>) -> Self {
        Self::build_with_sink(cache_config, session_user, None)
    }

    fn build_with_sink(
        cache_config: SummaryCacheConfig,
        session_user: Option<UserId>,
        sink: Option<Arc<dyn ReactionEventSink>>,
    ) -> Self {
        let reactions = Arc::new(MemoryReactionRepository::new());
        let users = Arc::new(MemoryUserRepository::new());
        let store = Arc::new(MemoryReactableStore::new());
        let events = Arc::new(RecordingEventSink::new());

        let ctx = ServiceContextBuilder::new()
            .reaction_repo(reactions.clone())
            .user_repo(users.clone())
            .reactable_store(store.clone())
            .summary_cache(Arc::new(MemorySummaryCache::new()))
            .cache_config(cache_config)
            .events(sink.unwrap_or_else(|| events.clone() as Arc<dyn ReactionEventSink>))
            .session(Arc::new(FixedSession::new(session_user)))
            .build()
            .expect("all dependencies provided");

        Self {
            ctx,
            reactions,
            users,
            store,
            events,
        }
    }

    /// Look up the denormalized column of a reactable fixture
    pub fn column_of<R: Reactable>(&self, column: &str, id: i64) -> Option<Option<f64>> {
        self.store.column(R::TABLE, column, id)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
