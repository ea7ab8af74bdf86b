// Per-user outcomes of a batched feed operation.
//
// Purpose
// - Outcome: tagged result for one user (payload, nothing, or fault).
// - BatchResponse: one outcome per user id of a batch.
//
// Responsibilities
// - Keep the first outcome recorded for a user id; later ones for the same id are ignored.

use std::collections::HashMap;

use crate::core::feed::key::UserId;
use crate::core::ports::FeedError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Empty,
    Fault(FeedError),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Fault(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn fault(&self) -> Option<&FeedError> {
        match self {
            Outcome::Fault(error) => Some(error),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Outcome::Empty, Outcome::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResponse<T> {
    outcomes: HashMap<UserId, Outcome<T>>,
}

impl<T> Default for BatchResponse<T> {
    fn default() -> Self {
        Self {
            outcomes: HashMap::new(),
        }
    }
}

impl<T> BatchResponse<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the user already has an outcome.
    pub fn record(&mut self, user_id: UserId, outcome: Outcome<T>) -> bool {
        if self.outcomes.contains_key(&user_id) {
            return false;
        }
        self.outcomes.insert(user_id, outcome);
        true
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.outcomes.contains_key(user_id)
    }

    pub fn get(&self, user_id: &UserId) -> Option<&Outcome<T>> {
        self.outcomes.get(user_id)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn faults(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_fault()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &Outcome<T>)> {
        self.outcomes.iter()
    }
}
