//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Account registration and credential checks
//! - `catalog` - Product listing and vendor-owned product management
//! - `cart` - Per-user cart mutations
//! - `session` - The logged-in user and role gating
//!
//! Services borrow a [`crate::db::Storage`] and are cheap to construct, so
//! callers build one per operation from [`crate::state::AppState`].

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod session;

pub use auth::{AccountStore, AuthError, Registration};
pub use cart::CartEngine;
pub use catalog::{CatalogError, CatalogStore, VendorCatalog};
pub use session::{SessionError, SessionHolder};
