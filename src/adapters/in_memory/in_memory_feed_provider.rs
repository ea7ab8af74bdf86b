// In memory implementation of the FeedProvider port.
//
// Purpose
// - Serve feeds from a process-local FeedStore, for tests, tooling and single-node use.
//
// Responsibilities
// - Express each public operation as one BatchExecutor call over FeedStore methods.
// - Hold the store's write lock for a whole batch, so only one writer touches any
//   user record at a time.
// - paginate resets the read marker and reads the page in the same per-user step.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::batch_executor::{BatchExecutor, Operation};
use crate::application::errors::ApplicationError;
use crate::core::feed::event::{Event, EventPayload};
use crate::core::feed::key::{FeedKey, UserId};
use crate::core::feed::outcome::{BatchResponse, Outcome};
use crate::core::feed::store::FeedStore;
use crate::core::feed::user_record::UserRecord;
use crate::core::ports::{FeedProvider, PageRequest};
use crate::shell::config::FeedConfig;

pub struct InMemoryFeedProvider {
    store: RwLock<FeedStore>,
    executor: BatchExecutor,
    per_page: usize,
}

impl InMemoryFeedProvider {
    pub fn new(namespace: impl Into<String>, per_page: usize) -> Self {
        Self::with_store(namespace, per_page, FeedStore::new())
    }

    pub fn with_store(namespace: impl Into<String>, per_page: usize, store: FeedStore) -> Self {
        Self {
            store: RwLock::new(store),
            executor: BatchExecutor::new(namespace),
            per_page,
        }
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self, ApplicationError> {
        config.validate()?;
        let store = FeedStore::seeded(&config.namespace, &config.seed)?;
        Ok(Self::with_store(&config.namespace, config.per_page, store))
    }

    pub fn namespace(&self) -> &str {
        self.executor.namespace()
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Users with a record in this provider's namespace, sorted.
    pub async fn known_users(&self) -> Vec<UserId> {
        let store = self.store.read().await;
        let mut users: Vec<UserId> = store
            .keys()
            .filter_map(|rendered| FeedKey::parse(rendered).ok())
            .filter(|key| key.namespace() == self.namespace())
            .map(|key| key.user_id().clone())
            .collect();
        users.sort();
        users
    }

    fn fetch_meta<T, P>(
        &self,
        store: &mut FeedStore,
        operation: Operation,
        user_ids: &[UserId],
        project: P,
    ) -> BatchResponse<T>
    where
        P: Fn(&UserRecord) -> Outcome<T>,
    {
        self.executor
            .execute(operation, user_ids, |key| Ok(project(&*store.record(key))))
    }
}

#[async_trait]
impl FeedProvider for InMemoryFeedProvider {
    async fn store(&self, user_ids: &[UserId], event: &EventPayload) -> BatchResponse<bool> {
        let mut store = self.store.write().await;
        self.executor.execute(Operation::Store, user_ids, |key| {
            let event = event.canonical()?;
            Ok(Outcome::Success(store.insert(key, event)))
        })
    }

    async fn remove(&self, user_ids: &[UserId], event: &EventPayload) -> BatchResponse<()> {
        let mut store = self.store.write().await;
        self.executor.execute(Operation::Remove, user_ids, |key| {
            let event = event.canonical()?;
            Ok(Outcome::from(store.remove(key, &event).then_some(())))
        })
    }

    async fn wipe(&self, user_ids: &[UserId]) -> BatchResponse<()> {
        let mut store = self.store.write().await;
        self.executor.execute(Operation::Wipe, user_ids, |key| {
            store.clear(key);
            Ok(Outcome::Success(()))
        })
    }

    async fn all(&self, user_ids: &[UserId]) -> BatchResponse<Vec<Event>> {
        let mut store = self.store.write().await;
        self.executor.execute(Operation::All, user_ids, |key| {
            Ok(Outcome::Success(store.read_all(key)))
        })
    }

    async fn paginate(
        &self,
        user_ids: &[UserId],
        request: PageRequest,
    ) -> BatchResponse<Vec<Event>> {
        let mut store = self.store.write().await;
        let reset_at = (!request.peek).then(Utc::now);
        let per_page = request.per_page.unwrap_or(self.per_page);
        self.executor.execute(Operation::Paginate, user_ids, |key| {
            if let Some(at) = reset_at {
                store.reset_read(key, at);
            }
            Ok(Outcome::Success(store.read_page(key, request.page, per_page)))
        })
    }

    async fn reset_last_read(
        &self,
        user_ids: &[UserId],
        at: Option<DateTime<Utc>>,
    ) -> BatchResponse<DateTime<Utc>> {
        let mut store = self.store.write().await;
        let at = at.unwrap_or_else(Utc::now);
        self.executor
            .execute(Operation::ResetLastRead, user_ids, |key| {
                store.reset_read(key, at);
                Ok(Outcome::Success(at))
            })
    }

    async fn total_count(&self, user_ids: &[UserId]) -> BatchResponse<u64> {
        let mut store = self.store.write().await;
        self.fetch_meta(
            &mut store,
            Operation::TotalCount,
            user_ids,
            |record| Outcome::Success(record.total_count()),
        )
    }

    async fn unread_count(&self, user_ids: &[UserId]) -> BatchResponse<u64> {
        let mut store = self.store.write().await;
        self.fetch_meta(
            &mut store,
            Operation::UnreadCount,
            user_ids,
            |record| Outcome::Success(record.unread_count()),
        )
    }

    async fn last_read(&self, user_ids: &[UserId]) -> BatchResponse<DateTime<Utc>> {
        let mut store = self.store.write().await;
        self.fetch_meta(
            &mut store,
            Operation::LastRead,
            user_ids,
            |record| Outcome::from(record.last_read()),
        )
    }
}
