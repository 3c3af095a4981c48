//! Shopping cart arithmetic.
//!
//! A cart is an ordered list of lines, at most one per product. Each line
//! embeds a snapshot of the product taken the first time it was added; later
//! catalog edits do not reach it, so totals are computed from the snapshot
//! price.
//!
//! All operations here are pure. Persistence lives in
//! [`crate::db::carts::CartRepository`].

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use shopwai_core::{Price, ProductId};

use super::Product;
use crate::db::Record;

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// How many units. Never zero.
    pub quantity: NonZeroU32,
    /// The product as it was when first added.
    pub product: Product,
}

impl CartItem {
    /// Snapshot price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}

impl Record for CartItem {
    type Key = ProductId;

    fn key(&self) -> &ProductId {
        &self.product_id
    }
}

/// A user's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consume the cart, returning its lines.
    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the same product id is incremented and keeps its
    /// original snapshot; otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.line_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }
        self.items.push(CartItem {
            product_id: product.id.clone(),
            quantity: NonZeroU32::MIN,
            product: product.clone(),
        });
    }

    /// Add one unit to an existing line. Returns `false` if there is no such line.
    pub fn increase(&mut self, product_id: &ProductId) -> bool {
        match self.line_mut(product_id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Take one unit off a line, dropping the line when it reaches zero.
    /// Returns `false` if there is no such line.
    pub fn decrease(&mut self, product_id: &ProductId) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        match NonZeroU32::new(item.quantity.get() - 1) {
            Some(quantity) => item.quantity = quantity,
            None => {
                self.items.remove(index);
            }
        }
        true
    }

    /// Drop a line regardless of quantity. Returns `false` if there was none.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.product_id != product_id);
        self.items.len() != before
    }

    /// Sum of snapshot price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}
