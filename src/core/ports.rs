// Ports define what callers can ask of a feed backend, without implementing it.
//
// Purpose
// - Describe the batched feed operations as a trait (FeedProvider).
//
// Responsibilities
// - Keep callers independent of where feeds live by coding against the trait.
// - Every operation answers with one outcome per requested user id; a batch as a
//   whole never fails.
//
// Boundaries
// - No concrete storage here. Adapters implement the trait in the adapters layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::feed::event::{Event, EventError, EventPayload};
use crate::core::feed::key::{KeyError, UserId};
use crate::core::feed::outcome::BatchResponse;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("invalid feed key: {0}")]
    InvalidKey(#[from] KeyError),

    #[error("invalid event: {0}")]
    InvalidEvent(#[from] EventError),
}

/// `page` is 1-based; `None` or a non-positive page selects every event.
/// `per_page` falls back to the provider's configured page size.
/// `peek` leaves the read marker untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub per_page: Option<usize>,
    pub peek: bool,
}

impl PageRequest {
    pub fn page(page: i64) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn peek(mut self) -> Self {
        self.peek = true;
        self
    }
}

#[async_trait]
pub trait FeedProvider: Send + Sync {
    /// `Success(false)` when the event was already in the feed.
    async fn store(&self, user_ids: &[UserId], event: &EventPayload) -> BatchResponse<bool>;

    /// `Empty` when the event was not in the feed.
    async fn remove(&self, user_ids: &[UserId], event: &EventPayload) -> BatchResponse<()>;

    async fn wipe(&self, user_ids: &[UserId]) -> BatchResponse<()>;

    async fn all(&self, user_ids: &[UserId]) -> BatchResponse<Vec<Event>>;

    async fn paginate(
        &self,
        user_ids: &[UserId],
        request: PageRequest,
    ) -> BatchResponse<Vec<Event>>;

    /// `at` defaults to now. Answers with the marker that was set.
    async fn reset_last_read(
        &self,
        user_ids: &[UserId],
        at: Option<DateTime<Utc>>,
    ) -> BatchResponse<DateTime<Utc>>;

    async fn total_count(&self, user_ids: &[UserId]) -> BatchResponse<u64>;

    async fn unread_count(&self, user_ids: &[UserId]) -> BatchResponse<u64>;

    /// `Empty` for users whose marker was never reset.
    async fn last_read(&self, user_ids: &[UserId]) -> BatchResponse<DateTime<Utc>>;
}
