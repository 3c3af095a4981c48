//! Cart engine.
//!
//! Per-user cart mutations. Every operation loads the user's cart, applies the
//! change and persists it before returning the new state.

use tracing::{debug, instrument};

use shopwai_core::{Price, ProductId, UserId};

use crate::db::carts::CartRepository;
use crate::db::{RepositoryError, Storage};
use crate::models::{Cart, Product};

/// Cart engine over per-user cart storage.
pub struct CartEngine<'a> {
    carts: CartRepository<'a>,
}

impl<'a> CartEngine<'a> {
    /// Create a cart engine over `storage`.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self {
            carts: CartRepository::new(storage),
        }
    }

    /// The user's cart; empty if they never added anything.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored cart is malformed.
    pub fn cart(&self, user_id: &UserId) -> Result<Cart, RepositoryError> {
        self.carts.get(user_id)
    }

    /// Add one unit of `product`, snapshotting it on first add.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&self, user_id: &UserId, product: &Product) -> Result<Cart, RepositoryError> {
        let cart = self.carts.update(user_id, |cart| cart.add(product))?;
        debug!(items = cart.item_count(), "Added to cart");
        Ok(cart)
    }

    /// Add one unit to an existing line. Unknown ids leave the cart as is.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    #[instrument(skip(self))]
    pub fn increase(&self, user_id: &UserId, product_id: &ProductId) -> Result<Cart, RepositoryError> {
        self.carts.update(user_id, |cart| {
            cart.increase(product_id);
        })
    }

    /// Take one unit off a line, dropping it at zero. Unknown ids leave the cart as is.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    #[instrument(skip(self))]
    pub fn decrease(&self, user_id: &UserId, product_id: &ProductId) -> Result<Cart, RepositoryError> {
        self.carts.update(user_id, |cart| {
            cart.decrease(product_id);
        })
    }

    /// Drop a line whatever its quantity.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    #[instrument(skip(self))]
    pub fn remove(&self, user_id: &UserId, product_id: &ProductId) -> Result<Cart, RepositoryError> {
        self.carts.update(user_id, |cart| {
            cart.remove(product_id);
        })
    }

    /// Empty the user's cart.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    #[instrument(skip(self))]
    pub fn clear(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.carts.clear(user_id)?;
        debug!("Cart cleared");
        Ok(())
    }

    /// Sum of snapshot price times quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored cart is malformed.
    pub fn total(&self, user_id: &UserId) -> Result<Price, RepositoryError> {
        Ok(self.cart(user_id)?.total())
    }

    /// Sum of quantities.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored cart is malformed.
    pub fn item_count(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        Ok(self.cart(user_id)?.item_count())
    }
}
