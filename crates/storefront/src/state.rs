//! Application state shared across commands.

use std::sync::Arc;

use shopwai_core::CurrencyCode;
use tracing::info;

use crate::config::StorefrontConfig;
use crate::db::{FileStore, Storage};
use crate::error::Result;
use crate::services::auth::Hasher;
use crate::services::{AccountStore, CartEngine, CatalogStore, SessionHolder};

/// Application state.
///
/// This struct is cheaply cloneable via `Arc` and hands out the account,
/// catalog, cart and session services over one shared storage.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storage: Storage,
    hasher: Hasher,
}

impl AppState {
    /// Open the file-backed store described by `config`, seeding sample
    /// products on first use if configured to.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created, the hashing
    /// parameters are invalid, or seeding fails.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let backend = FileStore::open(&config.data_dir)?;
        info!(data_dir = %backend.root().display(), "Opened store");
        let storage = Storage::new(backend, config.key_prefix.clone());
        Self::new(config, storage)
    }

    /// Build state over an existing storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the hashing parameters are invalid or seeding fails.
    pub fn new(config: StorefrontConfig, storage: Storage) -> Result<Self> {
        let hasher = Hasher::new(&config.password_hashing)?;
        let state = Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                hasher,
            }),
        };
        if state.config().seed_sample_products {
            state.catalog().seed_samples()?;
        }
        Ok(state)
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Display currency.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.inner.config.currency
    }

    /// Account store.
    #[must_use]
    pub fn accounts(&self) -> AccountStore<'_> {
        AccountStore::new(&self.inner.storage, &self.inner.hasher)
    }

    /// Catalog store.
    #[must_use]
    pub fn catalog(&self) -> CatalogStore<'_> {
        CatalogStore::new(&self.inner.storage)
    }

    /// Cart engine.
    #[must_use]
    pub fn carts(&self) -> CartEngine<'_> {
        CartEngine::new(&self.inner.storage)
    }

    /// Session holder.
    #[must_use]
    pub fn session(&self) -> SessionHolder<'_> {
        SessionHolder::new(&self.inner.storage)
    }
}
