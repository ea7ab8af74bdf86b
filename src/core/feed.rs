// This module groups the activity feed domain components.
//
// Structure
// - key.rs: user ids and the feed key rendering
// - event.rs: payload, canonical and user-facing event values
// - user_record.rs: per-user counters and ordered activity set
// - store.rs: the keyed collection of user records
// - pager.rs: page window selection
// - outcome.rs: per-user outcomes and the batch response

pub mod event;
pub mod key;
pub mod outcome;
pub mod pager;
pub mod store;
pub mod user_record;
