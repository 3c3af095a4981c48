//! Product repository.

use shopwai_core::{ProductId, UserId};

use super::{RepositoryError, Storage, Table};
use crate::models::Product;
use crate::models::storage_keys;

/// Repository for the product catalog.
pub struct ProductRepository<'a> {
    storage: &'a Storage,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn table(&self) -> Table<'a, Product> {
        Table::new(self.storage, self.storage.key(storage_keys::PRODUCTS))
    }

    /// Whether the catalog has ever been written (even if now empty).
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn is_initialized(&self) -> Result<bool, RepositoryError> {
        self.table().exists()
    }

    /// Every product, in listing order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored collection is malformed.
    pub fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        self.table().all()
    }

    /// Products owned by `owner_id`, in listing order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored collection is malformed.
    pub fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Product>, RepositoryError> {
        let mut products = self.list()?;
        products.retain(|p| p.is_owned_by(owner_id));
        Ok(products)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored collection is malformed.
    pub fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.table().find(id)
    }

    /// Insert a product or replace the one with the same id in place.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn upsert(&self, product: Product) -> Result<(), RepositoryError> {
        self.table().upsert(product)
    }

    /// Apply `f` to the stored product with this id and persist it.
    ///
    /// Returns `RepositoryError::NotFound` without writing if the id is unknown,
    /// or whatever error `f` rejects the product with.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn update_with<E>(
        &self,
        id: &ProductId,
        f: impl FnOnce(&mut Product) -> Result<(), E>,
    ) -> Result<Product, E>
    where
        E: From<RepositoryError>,
    {
        self.table().modify(|products| {
            let product = products
                .iter_mut()
                .find(|p| &p.id == id)
                .ok_or(RepositoryError::NotFound)?;
            f(product)?;
            Ok(product.clone())
        })
    }

    /// Delete a product. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        self.table().delete(id)
    }

    /// Delete a product after `check` accepts it, under one write lock.
    ///
    /// Returns `Ok(false)` without calling `check` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns whatever `check` rejects the product with, or a storage error.
    pub fn delete_if<E>(
        &self,
        id: &ProductId,
        check: impl FnOnce(&Product) -> Result<(), E>,
    ) -> Result<bool, E>
    where
        E: From<RepositoryError>,
    {
        self.table().modify(|products| {
            let Some(index) = products.iter().position(|p| &p.id == id) else {
                return Ok(false);
            };
            if let Some(product) = products.get(index) {
                check(product)?;
            }
            products.remove(index);
            Ok(true)
        })
    }

    /// Replace the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn replace_all(&self, products: &[Product]) -> Result<(), RepositoryError> {
        self.table().replace_all(products)
    }
}
