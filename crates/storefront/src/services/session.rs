//! Session holder.
//!
//! Tracks the single logged-in user. Every login overwrites it, logout clears
//! it, and the gating helpers decide who may enter the vendor panel or the
//! storefront.

use thiserror::Error;
use tracing::{debug, info, instrument};

use shopwai_core::Role;

use crate::db::RepositoryError;
use crate::db::Storage;
use crate::db::session::SessionRepository;
use crate::models::{CurrentUser, User};

/// Errors from session gating.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Nobody is logged in.
    #[error("not logged in")]
    NotLoggedIn,

    /// Logged in with a role that may not enter this area.
    #[error("forbidden for role {role}")]
    Forbidden {
        /// Role of the current user.
        role: Role,
    },

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Holder of the current user.
pub struct SessionHolder<'a> {
    repo: SessionRepository<'a>,
}

impl<'a> SessionHolder<'a> {
    /// Create a session holder over `storage`.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self {
            repo: SessionRepository::new(storage),
        }
    }

    /// Make `user` the current user, replacing whoever was logged in.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Repository` if the session cannot be stored.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn login(&self, user: &User) -> Result<CurrentUser, SessionError> {
        let current = CurrentUser::from(user);
        self.repo.set(&current)?;
        info!(role = %current.role, "Session started");
        Ok(current)
    }

    /// Clear the current user. Logging out twice is fine.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Repository` if the session cannot be cleared.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), SessionError> {
        self.repo.clear()?;
        debug!("Session cleared");
        Ok(())
    }

    /// The current user, if anyone is logged in.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Repository` if the stored session is unreadable.
    pub fn current(&self) -> Result<Option<CurrentUser>, SessionError> {
        Ok(self.repo.get()?)
    }

    /// Gate for the storefront: any logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotLoggedIn` when nobody is logged in.
    pub fn require_any(&self) -> Result<CurrentUser, SessionError> {
        self.current()?.ok_or(SessionError::NotLoggedIn)
    }

    /// Gate for the vendor panel: a logged-in vendor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotLoggedIn` when nobody is logged in and
    /// `SessionError::Forbidden` for customers.
    pub fn require_vendor(&self) -> Result<CurrentUser, SessionError> {
        let current = self.require_any()?;
        if current.role.is_vendor() {
            Ok(current)
        } else {
            Err(SessionError::Forbidden { role: current.role })
        }
    }
}
