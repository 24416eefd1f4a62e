//! User identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CycleError, CycleResult};

const MAX_USER_ID_LEN: usize = 128;

/// Stable per-user identifier.
///
/// Restricted to `[A-Za-z0-9_-]` because it doubles as a directory name
/// in the file store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> CycleResult<Self> {
        let id = id.into();
        let valid = !id.is_empty()
            && id.len() <= MAX_USER_ID_LEN
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(UserId(id))
        } else {
            Err(CycleError::InvalidUserId(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = CycleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserId::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who is making a request. Anonymous sessions may not touch stored data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(UserId),
}

impl Identity {
    pub fn require_user(&self) -> CycleResult<&UserId> {
        match self {
            Identity::User(id) => Ok(id),
            Identity::Anonymous => Err(CycleError::Unauthenticated),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }
}

impl From<UserId> for Identity {
    fn from(id: UserId) -> Self {
        Identity::User(id)
    }
}
