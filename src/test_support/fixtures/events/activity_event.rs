// Shared test fixture for activity event payloads.
// Compiled into the crate only during tests, exposed under
// `crate::test_support::fixtures::events::activity_event`.

use crate::core::feed::event::EventPayload;
use chrono::{DateTime, Duration, Utc};
use std::fs;

const FIXTURE_PATH: &str = "./src/test_support/fixtures/events/json/activity_event.json";

pub struct EventPayloadBuilder {
    inner: EventPayload,
}

impl Default for EventPayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl EventPayloadBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string(FIXTURE_PATH).unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn value(mut self, v: impl Into<String>) -> Self {
        self.inner.value = v.into();
        self
    }

    pub fn at(mut self, v: DateTime<Utc>) -> Self {
        self.inner.at = v;
        self
    }

    pub fn seconds_later(mut self, seconds: i64) -> Self {
        self.inner.at += Duration::seconds(seconds);
        self
    }

    pub fn build(self) -> EventPayload {
        self.inner
    }
}

/// Canonical payload as stored in the JSON fixture.
pub fn make_activity_event_payload() -> EventPayload {
    EventPayloadBuilder::new().build()
}

/// Payload `seconds` after the fixture timestamp.
pub fn make_payload_at(value: &str, seconds: i64) -> EventPayload {
    EventPayloadBuilder::new()
        .value(value)
        .seconds_later(seconds)
        .build()
}

/// `count` payloads named e1..eN in increasing timestamp order.
pub fn make_ordered_payloads(count: usize) -> Vec<EventPayload> {
    (1..=count)
        .map(|n| make_payload_at(&format!("e{n}"), n as i64))
        .collect()
}
