//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::session::SessionError;

/// Errors that can occur during registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] shopwai_core::EmailError),

    /// No account matches email, password and role together.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("email already registered")]
    DuplicateEmail,

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Name is blank.
    #[error("name cannot be empty")]
    EmptyName,

    /// Password is empty.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// Session could not be established.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
