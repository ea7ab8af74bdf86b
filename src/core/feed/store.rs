// Feed store: the single owner of every user record.
//
// Purpose
// - Map rendered feed keys to user records and apply single-key operations to them.
//
// Responsibilities
// - Create records on first access through `record`, never implicitly elsewhere.
// - Hand out copies (events, counters), not references into records.
//
// Boundaries
// - Single-threaded. Callers sharing a store across tasks wrap it in a lock.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::feed::event::{Event, EventPayload, SerializedEvent};
use crate::core::feed::key::{FeedKey, UserId};
use crate::core::feed::pager;
use crate::core::feed::user_record::UserRecord;
use crate::core::ports::FeedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    TotalCount,
    UnreadCount,
    LastRead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaValue {
    Count(u64),
    Timestamp(Option<DateTime<Utc>>),
}

/// Initial feed contents for one user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedFeed {
    pub user_id: UserId,
    #[serde(default)]
    pub events: Vec<EventPayload>,
    #[serde(default)]
    pub last_read: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct FeedStore {
    records: HashMap<String, UserRecord>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events are inserted before the read marker is applied, so seeded
    /// events stay unread.
    pub fn seeded(namespace: &str, seeds: &[SeedFeed]) -> Result<Self, FeedError> {
        let mut store = Self::new();
        for seed in seeds {
            let key = FeedKey::resolve(namespace, &seed.user_id)?;
            for payload in &seed.events {
                store.insert(&key, payload.canonical()?);
            }
            if let Some(at) = seed.last_read {
                store.record(&key).last_read = Some(at);
            }
        }
        info!(namespace, users = store.len(), "seeded feed store");
        Ok(store)
    }

    /// Get-or-create.
    pub fn record(&mut self, key: &FeedKey) -> &mut UserRecord {
        self.records.entry(key.to_string()).or_insert_with(|| {
            debug!(%key, "creating user record");
            UserRecord::default()
        })
    }

    pub fn peek(&self, key: &FeedKey) -> Option<&UserRecord> {
        self.records.get(&key.to_string())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn insert(&mut self, key: &FeedKey, event: SerializedEvent) -> bool {
        self.record(key).push(event)
    }

    pub fn remove(&mut self, key: &FeedKey, event: &SerializedEvent) -> bool {
        self.record(key).pop(event)
    }

    pub fn clear(&mut self, key: &FeedKey) {
        self.record(key).wipe();
    }

    pub fn read_all(&mut self, key: &FeedKey) -> Vec<Event> {
        let user_id = key.user_id();
        self.record(key)
            .activity()
            .iter()
            .map(|event| event.to_event(user_id))
            .collect()
    }

    pub fn read_page(&mut self, key: &FeedKey, page: Option<i64>, per_page: usize) -> Vec<Event> {
        let events = self.read_all(key);
        pager::page(&events, page, per_page).to_vec()
    }

    pub fn reset_read(&mut self, key: &FeedKey, at: DateTime<Utc>) {
        self.record(key).mark_read(at);
    }

    pub fn meta_query(&mut self, key: &FeedKey, field: MetaField) -> MetaValue {
        let record = self.record(key);
        match field {
            MetaField::TotalCount => MetaValue::Count(record.total_count()),
            MetaField::UnreadCount => MetaValue::Count(record.unread_count()),
            MetaField::LastRead => MetaValue::Timestamp(record.last_read()),
        }
    }
}
