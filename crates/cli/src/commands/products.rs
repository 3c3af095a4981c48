//! Product commands.

use std::fmt::Write as _;

use shopwai_core::{CurrencyCode, ProductId};
use shopwai_storefront::error::Result;
use shopwai_storefront::models::{Product, ProductChanges};
use shopwai_storefront::services::CatalogError;
use shopwai_storefront::state::AppState;

/// List products. `mine` restricts to the logged-in vendor's products.
///
/// # Errors
///
/// Returns an error if nobody is logged in, or `mine` is set for a non-vendor.
pub fn list(state: &AppState, search: Option<&str>, mine: bool) -> Result<String> {
    let session = state.session();
    let catalog = state.catalog();

    let products = if mine {
        let vendor = session.require_vendor()?;
        let mut products = catalog.search(search.unwrap_or_default())?;
        products.retain(|p| p.is_owned_by(&vendor.id));
        products
    } else {
        session.require_any()?;
        catalog.search(search.unwrap_or_default())?
    };

    Ok(render(&products, state.currency()))
}

/// List a new product owned by the logged-in vendor.
///
/// # Errors
///
/// Returns an error if the current user is not a vendor or the input is invalid.
pub fn add(state: &AppState, name: &str, price: &str, image: Option<&str>) -> Result<String> {
    let vendor = state.session().require_vendor()?;
    let product = state
        .catalog()
        .for_vendor(&vendor.id)
        .create(name, price, image)?;
    Ok(format!(
        "Added {} ({}) id={}",
        product.name,
        product.price.display(state.currency()),
        product.id
    ))
}

/// What an update does to the product image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageChange {
    /// Leave the stored image as it is.
    Keep,
    /// Replace it.
    Set(String),
    /// Remove it.
    Clear,
}

/// Replace name and price of one of the vendor's products, and its image
/// according to `image`.
///
/// # Errors
///
/// Returns an error if the product is unknown or owned by someone else.
pub fn update(
    state: &AppState,
    id: &ProductId,
    name: String,
    price: String,
    image: ImageChange,
) -> Result<String> {
    let vendor = state.session().require_vendor()?;
    let image = match image {
        ImageChange::Set(url) => Some(url),
        ImageChange::Clear => None,
        ImageChange::Keep => state
            .catalog()
            .get(id)?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?
            .image,
    };
    let changes = ProductChanges { name, price, image };
    let product = state.catalog().for_vendor(&vendor.id).update(id, &changes)?;
    Ok(format!(
        "Updated {} ({})",
        product.name,
        product.price.display(state.currency())
    ))
}

/// Delete one of the vendor's products.
///
/// # Errors
///
/// Returns an error if the product is owned by someone else.
pub fn delete(state: &AppState, id: &ProductId) -> Result<String> {
    let vendor = state.session().require_vendor()?;
    state.catalog().for_vendor(&vendor.id).delete(id)?;
    Ok(format!("Deleted {id}"))
}

fn render(products: &[Product], currency: CurrencyCode) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }
    let mut out = String::new();
    for p in products {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            p.id,
            p.name,
            p.price.display(currency),
            p.display_image()
        );
    }
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopwai_core::Role;

    use super::*;
    use crate::commands::{account, testing};

    #[test]
    fn test_list_requires_login() {
        let state = testing::state();
        let err = list(&state, None, false).unwrap_err();
        assert_eq!(err.user_message(), "Please log in first");
    }

    #[test]
    fn test_customer_sees_samples() {
        let state = testing::state();
        account::register(&state, "João", "joao@x.org", "pw", "pw", Role::Customer).unwrap();

        let out = list(&state, Some("banana"), false).unwrap();
        assert_eq!(out, "2\tBanana\tR$ 5.00\t/ripe-banana.png");

        let err = list(&state, None, true).unwrap_err();
        assert_eq!(err.user_message(), "Your account type cannot do that");
        assert!(add(&state, "X", "1", None).is_err());
    }

    #[test]
    fn test_vendor_manages_own_products() {
        let state = testing::state();
        account::register(&state, "Maria", "maria@x.org", "pw", "pw", Role::Vendor).unwrap();

        assert_eq!(list(&state, None, true).unwrap(), "No products found.");
        add(&state, "Tapioca", "3,50", None).unwrap();

        let mine = list(&state, None, true).unwrap();
        assert!(mine.contains("Tapioca\tR$ 3.50\t/placeholder.svg?height=200&width=200&query=Tapioca"));
        assert_eq!(mine.lines().count(), 1);

        let err = delete(&state, &ProductId::new("1")).unwrap_err();
        assert_eq!(err.user_message(), "You can only change your own products");
    }

    #[test]
    fn test_update_keeps_image_unless_told_otherwise() {
        let state = testing::state();
        account::register(&state, "Maria", "maria@x.org", "pw", "pw", Role::Vendor).unwrap();
        add(&state, "Queijo", "20", Some("/queijo.png")).unwrap();
        let id = state.catalog().search("queijo").unwrap().pop().unwrap().id;
        let image = |state: &AppState| state.catalog().get(&id).unwrap().unwrap().image;

        update(&state, &id, "Queijo Coalho".into(), "22".into(), ImageChange::Keep).unwrap();
        assert_eq!(image(&state).as_deref(), Some("/queijo.png"));

        let set = ImageChange::Set("/coalho.png".into());
        update(&state, &id, "Queijo Coalho".into(), "22".into(), set).unwrap();
        assert_eq!(image(&state).as_deref(), Some("/coalho.png"));

        update(&state, &id, "Queijo Coalho".into(), "22".into(), ImageChange::Clear).unwrap();
        assert_eq!(image(&state), None);

        let err = update(&state, &ProductId::new("nope"), "x".into(), "1".into(), ImageChange::Keep)
            .unwrap_err();
        assert_eq!(err.user_message(), "Product nope not found");
    }
}
