//! Integration tests for Shopwai.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopwai-integration-tests
//! ```
//!
//! Each test gets its own temporary data directory, so tests run in parallel
//! and leave nothing behind.

use std::path::{Path, PathBuf};

use shopwai_core::Role;
use shopwai_storefront::config::{PasswordHashing, StorefrontConfig};
use shopwai_storefront::models::User;
use shopwai_storefront::services::Registration;
use shopwai_storefront::state::AppState;
use tempfile::TempDir;

/// A file-backed store in a temporary directory.
pub struct TestContext {
    dir: TempDir,
    /// Configuration used by [`Self::open`].
    pub config: StorefrontConfig,
}

impl TestContext {
    /// Create a context with sample seeding enabled.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StorefrontConfig {
            data_dir: dir.path().to_path_buf(),
            password_hashing: PasswordHashing::minimal(),
            ..StorefrontConfig::default()
        };
        Self { dir, config }
    }

    /// Open the store. Calling this again simulates a process restart.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be opened.
    #[must_use]
    pub fn open(&self) -> AppState {
        AppState::open(self.config.clone()).expect("Failed to open store")
    }

    /// The temporary data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the file holding storage key `name` (without prefix).
    #[must_use]
    pub fn file_for(&self, name: &str) -> PathBuf {
        self.data_dir()
            .join(format!("{}_{name}.json", self.config.key_prefix))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Register an account whose password is `"password"`.
///
/// # Panics
///
/// Panics if registration fails.
#[must_use]
pub fn register(state: &AppState, name: &str, email: &str, role: Role) -> User {
    state
        .accounts()
        .register(&Registration {
            name,
            email,
            password: "password",
            password_confirmation: "password",
            role,
        })
        .expect("Failed to register test account")
}
