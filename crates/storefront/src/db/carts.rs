//! Cart repository.

use shopwai_core::UserId;

use super::{RepositoryError, Storage, Table};
use crate::models::storage_keys;
use crate::models::{Cart, CartItem};

/// Repository for per-user carts, one storage key per user.
pub struct CartRepository<'a> {
    storage: &'a Storage,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn table(&self, user_id: &UserId) -> Table<'a, CartItem> {
        Table::new(self.storage, self.storage.key(&storage_keys::cart(user_id)))
    }

    /// The stored cart for `user_id`; empty if none was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored cart is malformed.
    pub fn get(&self, user_id: &UserId) -> Result<Cart, RepositoryError> {
        Ok(Cart::from(self.table(user_id).all()?))
    }

    /// Load the cart, apply `f`, persist the result and return it.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn update(
        &self,
        user_id: &UserId,
        f: impl FnOnce(&mut Cart),
    ) -> Result<Cart, RepositoryError> {
        self.table(user_id).modify(|items| {
            let mut cart = Cart::from(std::mem::take(items));
            f(&mut cart);
            *items = cart.clone().into_items();
            Ok(cart)
        })
    }

    /// Forget the cart for `user_id` entirely.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn clear(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.storage
            .remove(&self.storage.key(&storage_keys::cart(user_id)))
    }
}
