//! Unified error handling.
//!
//! Provides a unified `AppError` type for every storefront entry point. Callers
//! show [`AppError::user_message`] to the user and hand the error to
//! [`AppError::report`] so internal failures are logged with full detail.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::catalog::CatalogError;
use crate::services::session::SessionError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// Registration or login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Session gating failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether this error comes from the machinery rather than user input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Storage(_) | Self::Config(_) => true,
            Self::Auth(err) => matches!(
                err,
                AuthError::Repository(_)
                    | AuthError::PasswordHash
                    | AuthError::Session(SessionError::Repository(_))
            ),
            Self::Catalog(err) => matches!(err, CatalogError::Repository(_)),
            Self::Session(err) => matches!(err, SessionError::Repository(_)),
        }
    }

    /// Message safe to show the user.
    ///
    /// Internal details (paths, serde positions) are never included.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_internal() {
            return match self {
                Self::Config(err) => err.to_string(),
                _ => "Something went wrong, please try again".to_string(),
            };
        }

        match self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => {
                    "Email, password or account type is incorrect".to_string()
                }
                AuthError::DuplicateEmail => {
                    "An account with this email already exists".to_string()
                }
                AuthError::PasswordMismatch => "Passwords do not match".to_string(),
                AuthError::EmptyName => "Please enter your name".to_string(),
                AuthError::EmptyPassword => "Please choose a password".to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                _ => "Authentication error".to_string(),
            },
            Self::Catalog(err) => match err {
                CatalogError::InvalidPrice(e) => format!("Invalid price: {e}"),
                CatalogError::EmptyName => "Please enter a product name".to_string(),
                CatalogError::NotFound(id) => format!("Product {id} not found"),
                CatalogError::NotOwner(_) => {
                    "You can only change your own products".to_string()
                }
                CatalogError::Repository(_) => "Catalog error".to_string(),
            },
            Self::Session(err) => match err {
                SessionError::NotLoggedIn => "Please log in first".to_string(),
                SessionError::Forbidden { .. } => {
                    "Your account type cannot do that".to_string()
                }
                SessionError::Repository(_) => "Session error".to_string(),
            },
            _ => self.to_string(),
        }
    }

    /// Log the error: internal failures at `error`, user mistakes at `debug`.
    pub fn report(&self) {
        if self.is_internal() {
            tracing::error!(error = %self, "Operation failed");
        } else {
            tracing::debug!(error = %self, "Operation rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use shopwai_core::{ProductId, Role};

    use super::*;

    #[test]
    fn test_storage_details_are_hidden() {
        let err = AppError::from(RepositoryError::Io(io::Error::other(
            "/home/someone/.shopwai/shopwai_users.json: permission denied",
        )));
        assert!(err.is_internal());
        assert!(!err.user_message().contains("/home"));

        let nested = AppError::from(AuthError::Session(SessionError::Repository(
            RepositoryError::Poisoned,
        )));
        assert!(nested.is_internal());
    }

    #[test]
    fn test_user_errors_are_specific() {
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).user_message(),
            "Email, password or account type is incorrect"
        );
        assert_eq!(
            AppError::from(SessionError::Forbidden { role: Role::Customer }).user_message(),
            "Your account type cannot do that"
        );
        let not_found = AppError::from(CatalogError::NotFound(ProductId::new("42")));
        assert!(!not_found.is_internal());
        assert_eq!(not_found.user_message(), "Product 42 not found");
    }

    #[test]
    fn test_config_error_is_shown() {
        let err = AppError::from(ConfigError::InvalidEnvVar(
            "SHOPWAI_CURRENCY".to_string(),
            "unsupported currency: JPY".to_string(),
        ));
        assert!(err.user_message().contains("SHOPWAI_CURRENCY"));
    }
}
