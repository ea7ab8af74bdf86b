// Per-user feed state held by the store.
//
// Invariants
// - total_count == activity.len() after every operation.
// - Counters never go below zero; decrements clamp instead of failing.
// - activity holds each canonical event at most once.
//
// Boundaries
// - No input or output. Only the store hands out mutable access.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::core::feed::event::SerializedEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub(crate) total_count: u64,
    pub(crate) unread_count: u64,
    pub(crate) last_read: Option<DateTime<Utc>>,
    pub(crate) activity: BTreeSet<SerializedEvent>,
}

impl UserRecord {
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn unread_count(&self) -> u64 {
        self.unread_count
    }

    pub fn last_read(&self) -> Option<DateTime<Utc>> {
        self.last_read
    }

    pub fn activity(&self) -> &BTreeSet<SerializedEvent> {
        &self.activity
    }

    /// Returns false when the event is already present.
    pub(crate) fn push(&mut self, event: SerializedEvent) -> bool {
        if !self.activity.insert(event) {
            return false;
        }
        self.adjust_counts(1);
        true
    }

    /// Returns false when the event is absent.
    pub(crate) fn pop(&mut self, event: &SerializedEvent) -> bool {
        if !self.activity.remove(event) {
            return false;
        }
        self.adjust_counts(-1);
        true
    }

    /// Drops events and counters. The read marker survives.
    pub(crate) fn wipe(&mut self) {
        self.activity.clear();
        self.total_count = 0;
        self.unread_count = 0;
    }

    pub(crate) fn mark_read(&mut self, at: DateTime<Utc>) {
        self.last_read = Some(at);
        self.unread_count = 0;
    }

    fn adjust_counts(&mut self, by: i64) {
        for counter in [&mut self.total_count, &mut self.unread_count] {
            *counter = counter.saturating_add_signed(by);
        }
    }
}
