// Feed key: identifies one user's feed inside a namespace.
//
// Purpose
// - Turn a (namespace, user id) pair into the stable string the store is keyed by.
// - Recover the originating user id from a rendered key.
//
// Responsibilities
// - Reject user ids that cannot be rendered without ambiguity.
// - Keep rendering deterministic: the same pair always yields the same string.
//
// Format
// - "{namespace}|u.{user_id}". Neither part may contain the '|' separator, so
//   two distinct pairs never render to the same string.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SEPARATOR: char = '|';
const USER_PREFIX: &str = "u.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("user id {user_id:?} contains invalid character {character:?}")]
    InvalidUserId { user_id: String, character: char },

    #[error("namespace {0:?} is invalid")]
    InvalidNamespace(String),

    #[error("malformed feed key {0:?}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedKey {
    namespace: String,
    user_id: UserId,
}

impl FeedKey {
    /// Validates both parts and builds the key.
    pub fn resolve(namespace: &str, user_id: &UserId) -> Result<Self, KeyError> {
        validate_namespace(namespace)?;
        validate_user_id(user_id.as_str())?;
        Ok(Self {
            namespace: namespace.to_string(),
            user_id: user_id.clone(),
        })
    }

    /// Inverse of the `Display` rendering.
    pub fn parse(rendered: &str) -> Result<Self, KeyError> {
        let malformed = || KeyError::Malformed(rendered.to_string());
        let (namespace, rest) = rendered.split_once(SEPARATOR).ok_or_else(malformed)?;
        let user_id = rest.strip_prefix(USER_PREFIX).ok_or_else(malformed)?;
        Self::resolve(namespace, &UserId::from(user_id))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

impl fmt::Display for FeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{USER_PREFIX}{}", self.namespace, self.user_id)
    }
}

pub fn validate_namespace(namespace: &str) -> Result<(), KeyError> {
    if namespace.is_empty()
        || namespace
            .chars()
            .any(|c| c == SEPARATOR || c.is_whitespace() || c.is_control())
    {
        return Err(KeyError::InvalidNamespace(namespace.to_string()));
    }
    Ok(())
}

fn validate_user_id(user_id: &str) -> Result<(), KeyError> {
    if user_id.is_empty() {
        return Err(KeyError::EmptyUserId);
    }
    if let Some(character) = user_id
        .chars()
        .find(|c| *c == SEPARATOR || c.is_whitespace() || c.is_control())
    {
        return Err(KeyError::InvalidUserId {
            user_id: user_id.to_string(),
            character,
        });
    }
    Ok(())
}
