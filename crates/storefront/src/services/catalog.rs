//! Catalog store.
//!
//! Product CRUD over the shared product collection. [`CatalogStore`] is the
//! unrestricted view used for browsing and seeding; [`VendorCatalog`] scopes
//! writes to the products one vendor owns.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use shopwai_core::{Price, PriceError, ProductId, UserId};

use crate::db::products::ProductRepository;
use crate::db::{RepositoryError, Storage};
use crate::models::{Product, ProductChanges};

/// Owner id of the products seeded into an empty store.
pub const SAMPLE_OWNER: &str = "sample";

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Price input did not parse.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// Name is blank.
    #[error("product name cannot be empty")]
    EmptyName,

    /// No product has this id.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// The product belongs to another vendor.
    #[error("product {0} is owned by another vendor")]
    NotOwner(ProductId),

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Validated name, price and image.
struct Fields {
    name: String,
    price: Price,
    image: Option<String>,
}

impl Fields {
    fn parse(name: &str, price: &str, image: Option<&str>) -> Result<Self, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            price: Price::parse(price)?,
            image: image
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
        })
    }
}

/// Catalog store over the shared product collection.
pub struct CatalogStore<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CatalogStore<'a> {
    /// Create a catalog store over `storage`.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self {
            products: ProductRepository::new(storage),
        }
    }

    /// Every product in listing order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the collection is unreadable.
    pub fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list()?)
    }

    /// Products owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the collection is unreadable.
    pub fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list_by_owner(owner_id)?)
    }

    /// Products whose name contains `query`, ignoring case.
    /// A blank query matches everything.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the collection is unreadable.
    pub fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let needle = query.trim().to_lowercase();
        let mut products = self.list()?;
        if !needle.is_empty() {
            products.retain(|p| p.name.to_lowercase().contains(&needle));
        }
        Ok(products)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the collection is unreadable.
    pub fn get(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.get(id)?)
    }

    /// List a new product owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyName` or `CatalogError::InvalidPrice` for bad
    /// input; nothing is stored in that case.
    #[instrument(skip(self, image), fields(owner_id = %owner_id))]
    pub fn create(
        &self,
        owner_id: &UserId,
        name: &str,
        price: &str,
        image: Option<&str>,
    ) -> Result<Product, CatalogError> {
        let fields = Fields::parse(name, price, image)?;
        let product = Product {
            id: ProductId::generate(),
            name: fields.name,
            price: fields.price,
            image: fields.image,
            owner_id: owner_id.clone(),
            created_at: Utc::now(),
        };
        self.products.upsert(product.clone())?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Replace name, price and image of an existing product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown id, or a validation error.
    pub fn update(&self, id: &ProductId, changes: &ProductChanges) -> Result<Product, CatalogError> {
        self.update_checked(id, changes, |_| Ok(()))
    }

    /// Remove a product. Removing an unknown id is not an error.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` on storage failure.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &ProductId) -> Result<(), CatalogError> {
        if self.products.delete(id)? {
            info!("Product deleted");
        }
        Ok(())
    }

    /// Write the sample products if the catalog has never been written.
    /// Returns whether anything was seeded.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` on storage failure.
    pub fn seed_samples(&self) -> Result<bool, CatalogError> {
        if self.products.is_initialized()? {
            debug!("Catalog already initialized, skipping samples");
            return Ok(false);
        }
        let samples = sample_products()?;
        self.products.replace_all(&samples)?;
        info!(count = samples.len(), "Seeded sample products");
        Ok(true)
    }

    /// The catalog as seen by one vendor.
    #[must_use]
    pub const fn for_vendor(self, owner_id: &'a UserId) -> VendorCatalog<'a> {
        VendorCatalog {
            catalog: self,
            owner_id,
        }
    }

    #[instrument(skip(self, changes, check))]
    fn update_checked(
        &self,
        id: &ProductId,
        changes: &ProductChanges,
        check: impl FnOnce(&Product) -> Result<(), CatalogError>,
    ) -> Result<Product, CatalogError> {
        let fields = Fields::parse(&changes.name, &changes.price, changes.image.as_deref())?;
        let updated = self
            .products
            .update_with(id, |product| {
                check(product)?;
                product.name = fields.name;
                product.price = fields.price;
                product.image = fields.image;
                Ok(())
            })
            .map_err(|e| match e {
                CatalogError::Repository(RepositoryError::NotFound) => {
                    CatalogError::NotFound(id.clone())
                }
                other => other,
            })?;
        info!("Product updated");
        Ok(updated)
    }
}

/// Catalog writes scoped to the products one vendor owns.
pub struct VendorCatalog<'a> {
    catalog: CatalogStore<'a>,
    owner_id: &'a UserId,
}

impl VendorCatalog<'_> {
    /// The vendor's own products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the collection is unreadable.
    pub fn list(&self) -> Result<Vec<Product>, CatalogError> {
        self.catalog.list_by_owner(self.owner_id)
    }

    /// List a new product owned by this vendor.
    ///
    /// # Errors
    ///
    /// See [`CatalogStore::create`].
    pub fn create(
        &self,
        name: &str,
        price: &str,
        image: Option<&str>,
    ) -> Result<Product, CatalogError> {
        self.catalog.create(self.owner_id, name, price, image)
    }

    /// Update one of this vendor's products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotOwner` if another vendor owns it.
    pub fn update(&self, id: &ProductId, changes: &ProductChanges) -> Result<Product, CatalogError> {
        self.catalog
            .update_checked(id, changes, |product| self.ensure_owner(product))
    }

    /// Delete one of this vendor's products. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotOwner` if another vendor owns it.
    pub fn delete(&self, id: &ProductId) -> Result<(), CatalogError> {
        let removed = self
            .catalog
            .products
            .delete_if(id, |product| self.ensure_owner(product))?;
        if removed {
            info!(product_id = %id, owner_id = %self.owner_id, "Product deleted");
        }
        Ok(())
    }

    fn ensure_owner(&self, product: &Product) -> Result<(), CatalogError> {
        if product.is_owned_by(self.owner_id) {
            Ok(())
        } else {
            warn!(product_id = %product.id, owner_id = %self.owner_id, "Rejected write to foreign product");
            Err(CatalogError::NotOwner(product.id.clone()))
        }
    }
}

fn sample_products() -> Result<Vec<Product>, CatalogError> {
    let owner = UserId::new(SAMPLE_OWNER);
    let now = Utc::now();
    [
        ("1", "Farinha de Mandioca", "15.00", "/farinha.png"),
        ("2", "Banana", "5.00", "/ripe-banana.png"),
    ]
    .into_iter()
    .map(|(id, name, price, image)| {
        Ok(Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::parse(price)?,
            image: Some(image.to_owned()),
            owner_id: owner.clone(),
            created_at: now,
        })
    })
    .collect()
}
