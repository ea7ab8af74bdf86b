// Activity event values.
//
// Purpose
// - EventPayload: what a caller hands in to store or remove (value + timestamp).
// - SerializedEvent: the canonical form held in a user's activity set.
// - Event: the user-facing value returned by reads.
//
// Ordering and equality
// - SerializedEvent compares timestamp first, then value. Two payloads with the
//   same value and timestamp are the same event, whoever stores them.
//
// Timestamps
// - chrono DateTime<Utc> end to end, so a round trip through the store is exact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::feed::key::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event value must not be empty")]
    EmptyValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub value: String,
    pub at: DateTime<Utc>,
}

impl EventPayload {
    pub fn new(value: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            at,
        }
    }

    pub fn canonical(&self) -> Result<SerializedEvent, EventError> {
        if self.value.is_empty() {
            return Err(EventError::EmptyValue);
        }
        Ok(SerializedEvent {
            at: self.at,
            value: self.value.clone(),
        })
    }
}

/// Field order matters: the derived `Ord` sorts by `at`, then `value`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SerializedEvent {
    at: DateTime<Utc>,
    value: String,
}

impl SerializedEvent {
    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn to_event(&self, user_id: &UserId) -> Event {
        Event {
            user_id: user_id.clone(),
            value: self.value.clone(),
            at: self.at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub user_id: UserId,
    pub value: String,
    pub at: DateTime<Utc>,
}

impl Event {
    pub fn canonical(&self) -> SerializedEvent {
        SerializedEvent {
            at: self.at,
            value: self.value.clone(),
        }
    }

    pub fn payload(&self) -> EventPayload {
        EventPayload::new(self.value.clone(), self.at)
    }
}
