//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use shopwai_core::{Email, Role, UserId};

use super::User;

/// Session-stored user identity.
///
/// A copy of the account taken at login, without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's ID.
    pub id: UserId,
    /// User's display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// What the user may do.
    pub role: Role,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Collection names, joined to the configured prefix to form storage keys.
pub mod keys {
    use shopwai_core::UserId;

    /// All registered accounts.
    pub const USERS: &str = "users";

    /// All products of all vendors.
    pub const PRODUCTS: &str = "products";

    /// The logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// The cart belonging to `user_id`.
    #[must_use]
    pub fn cart(user_id: &UserId) -> String {
        format!("cart_{user_id}")
    }
}
