//! Account store.
//!
//! Registration and credential checks over the user collection. Passwords are
//! stored as salted Argon2id hashes; a login matches only when email, role and
//! password all agree.

mod error;
pub mod password;

pub use error::AuthError;
pub use password::Hasher;

use chrono::Utc;
use tracing::{info, instrument, warn};

use shopwai_core::{Email, Role, UserId};

use crate::db::users::UserRepository;
use crate::db::{RepositoryError, Storage};
use crate::models::{CurrentUser, User};
use crate::services::session::SessionHolder;

/// Sign-up form input.
#[derive(Clone, Copy)]
pub struct Registration<'r> {
    /// Display name.
    pub name: &'r str,
    /// Login email (validated).
    pub email: &'r str,
    /// Chosen password.
    pub password: &'r str,
    /// Password typed a second time.
    pub password_confirmation: &'r str,
    /// Customer or vendor.
    pub role: Role,
}

impl std::fmt::Debug for Registration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Account store: registration, authentication and login.
pub struct AccountStore<'a> {
    users: UserRepository<'a>,
    session: SessionHolder<'a>,
    hasher: &'a Hasher,
}

impl<'a> AccountStore<'a> {
    /// Create an account store over `storage`.
    #[must_use]
    pub const fn new(storage: &'a Storage, hasher: &'a Hasher) -> Self {
        Self {
            users: UserRepository::new(storage),
            session: SessionHolder::new(storage),
            hasher,
        }
    }

    /// Register a new account and make it the current session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs,
    /// `AuthError::EmptyName`/`EmptyPassword`/`InvalidEmail` for bad input, and
    /// `AuthError::DuplicateEmail` if the email is already registered. On error
    /// nothing is stored.
    #[instrument(skip(self, registration), fields(email = %registration.email, role = %registration.role))]
    pub fn register(&self, registration: &Registration<'_>) -> Result<User, AuthError> {
        if registration.password != registration.password_confirmation {
            return Err(AuthError::PasswordMismatch);
        }

        let name = registration.name.trim();
        if name.is_empty() {
            return Err(AuthError::EmptyName);
        }
        let email = Email::parse(registration.email)?;
        if registration.password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        // Fail fast before paying for a hash; `create` re-checks under the lock.
        if self.users.get_by_email(&email)?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let user = User {
            id: UserId::generate(),
            name: name.to_owned(),
            email,
            password_hash: self.hasher.hash(registration.password)?,
            role: registration.role,
            created_at: Utc::now(),
        };

        let user = self.users.create(user).map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::DuplicateEmail,
            other => AuthError::Repository(other),
        })?;
        info!(user_id = %user.id, "Account registered");

        if let Err(e) = self.session.login(&user) {
            self.users.delete(&user.email)?;
            warn!(user_id = %user.id, error = %e, "Session failed, account rolled back");
            return Err(e.into());
        }
        Ok(user)
    }

    /// Find the account matching email, password and role.
    ///
    /// Does not touch the session; see [`Self::login`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches all three.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, email: &str, password: &str, role: Role) -> Result<User, AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = self
            .users
            .list()?
            .into_iter()
            .filter(|u| u.email == email && u.role == role)
            .find(|u| self.hasher.verify(password, &u.password_hash));

        user.ok_or_else(|| {
            warn!(email = %email, role = %role, "Failed login attempt");
            AuthError::InvalidCredentials
        })
    }

    /// Authenticate and make the account the current session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on mismatch; the previous session
    /// is left untouched in that case.
    pub fn login(&self, email: &str, password: &str, role: Role) -> Result<CurrentUser, AuthError> {
        let user = self.authenticate(email, password, role)?;
        Ok(self.session.login(&user)?)
    }

    /// Look up an account by email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let email = Email::parse(email)?;
        Ok(self.users.get_by_email(&email)?)
    }

    /// Every registered account in registration order.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the user collection is unreadable.
    pub fn list(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.users.list()?)
    }
}
