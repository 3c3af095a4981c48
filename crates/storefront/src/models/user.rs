//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopwai_core::{Email, Role, UserId};

use crate::db::Record;

/// A registered account.
///
/// Created at registration and never modified afterwards.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, unique among users.
    pub email: Email,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Customer or vendor.
    pub role: Role,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Record for User {
    type Key = Email;

    fn key(&self) -> &Email {
        &self.email
    }
}
