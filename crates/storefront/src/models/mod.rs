//! Domain models for the storefront.
//!
//! These are the records persisted by the repositories in [`crate::db`]. Every
//! field is a validated type from `shopwai_core`, so a record that decodes is
//! a record that satisfies the store's invariants.

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem};
pub use product::{Product, ProductChanges};
pub use session::{CurrentUser, keys as storage_keys};
pub use user::User;
