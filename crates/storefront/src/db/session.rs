//! Current-user repository.

use super::{RepositoryError, Storage};
use crate::models::CurrentUser;
use crate::models::storage_keys;

/// Repository for the single logged-in user.
pub struct SessionRepository<'a> {
    storage: &'a Storage,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn key(&self) -> String {
        self.storage.key(storage_keys::CURRENT_USER)
    }

    /// The stored current user, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored value is malformed.
    pub fn get(&self) -> Result<Option<CurrentUser>, RepositoryError> {
        self.storage.read(&self.key())
    }

    /// Overwrite the current user.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn set(&self, user: &CurrentUser) -> Result<(), RepositoryError> {
        self.storage.write(&self.key(), user)
    }

    /// Remove the current user.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn clear(&self) -> Result<(), RepositoryError> {
        self.storage.remove(&self.key())
    }
}
