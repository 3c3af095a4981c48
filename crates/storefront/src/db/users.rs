//! User repository.

use shopwai_core::Email;

use super::{RepositoryError, Storage, Table};
use crate::models::User;
use crate::models::storage_keys;

/// Repository for registered accounts.
pub struct UserRepository<'a> {
    storage: &'a Storage,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn table(&self) -> Table<'a, User> {
        Table::new(self.storage, self.storage.key(storage_keys::USERS))
    }

    /// All users in registration order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored collection is malformed.
    pub fn list(&self) -> Result<Vec<User>, RepositoryError> {
        self.table().all()
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored collection is malformed.
    pub fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        self.table().find(email)
    }

    /// Append `user` unless an account with the same email exists.
    ///
    /// The uniqueness check and the append happen under one write lock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken.
    pub fn create(&self, user: User) -> Result<User, RepositoryError> {
        self.table().modify(|users| {
            if users.iter().any(|u| u.email == user.email) {
                return Err(RepositoryError::Conflict(user.email.to_string()));
            }
            users.push(user.clone());
            Ok(user)
        })
    }

    /// Remove the account with this email. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn delete(&self, email: &Email) -> Result<bool, RepositoryError> {
        self.table().delete(email)
    }
}
