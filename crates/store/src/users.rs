//! Users collection.
//!
//! `username` and `email` are unique at insert time and `username` stays
//! unique under profile updates. The store enforces both while holding the
//! write lock; the select intents let callers report a clash before trying.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    /// Opaque password hash, never interpreted by the store.
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl NewUser {
    pub(crate) fn into_user(self, id: u64, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            full_name: self.full_name,
            created_at,
        }
    }
}

/// Fields replaced by a profile update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileChanges {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
}
