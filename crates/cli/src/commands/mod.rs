//! Command implementations.
//!
//! Each command takes the opened [`shopwai_storefront::state::AppState`] and
//! returns the text to print on success.

pub mod account;
pub mod cart;
pub mod products;
pub mod users;

#[cfg(test)]
pub(crate) mod testing {
    use shopwai_storefront::config::{PasswordHashing, StorefrontConfig};
    use shopwai_storefront::db::Storage;
    use shopwai_storefront::state::AppState;

    /// In-memory state with the sample products and cheap hashing.
    #[allow(clippy::unwrap_used)]
    pub fn state() -> AppState {
        let config = StorefrontConfig {
            password_hashing: PasswordHashing::minimal(),
            ..StorefrontConfig::default()
        };
        AppState::new(config, Storage::in_memory("test")).unwrap()
    }
}
