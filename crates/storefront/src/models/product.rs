//! Product domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopwai_core::{Price, ProductId, UserId};

use crate::db::Record;

/// A catalog entry owned by one vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Vendor who may edit or delete this product.
    pub owner_id: UserId,
    /// When the product was listed.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The stored image, or a generated placeholder when none was given.
    #[must_use]
    pub fn display_image(&self) -> String {
        self.image.clone().unwrap_or_else(|| {
            format!(
                "/placeholder.svg?height=200&width=200&query={}",
                urlencoding::encode(&self.name)
            )
        })
    }

    /// Whether `user_id` owns this product.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

impl Record for Product {
    type Key = ProductId;

    fn key(&self) -> &ProductId {
        &self.id
    }
}

/// The editable fields of a product.
///
/// Updates replace all three; id and owner never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChanges {
    /// New display name.
    pub name: String,
    /// New price, as typed (parsed by the catalog).
    pub price: String,
    /// New image, `None` to clear it.
    pub image: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn banana(image: Option<&str>) -> Product {
        Product {
            id: ProductId::new("2"),
            name: "Banana Prata".to_owned(),
            price: Price::parse("5").unwrap(),
            image: image.map(str::to_owned),
            owner_id: UserId::new("sample"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_image_placeholder() {
        assert_eq!(
            banana(None).display_image(),
            "/placeholder.svg?height=200&width=200&query=Banana%20Prata"
        );
        assert_eq!(
            banana(Some("/ripe-banana.png")).display_image(),
            "/ripe-banana.png"
        );
    }

    #[test]
    fn test_missing_image_field_deserializes() {
        let json = r#"{
            "id": "2",
            "name": "Banana",
            "price": "5.00",
            "owner_id": "sample",
            "created_at": "2025-01-01T00:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.image.is_none());
        assert!(product.is_owned_by(&UserId::new("sample")));
    }
}
