//! Cart commands for the logged-in user.

use std::fmt::Write as _;

use shopwai_core::{CurrencyCode, ProductId};
use shopwai_storefront::error::Result;
use shopwai_storefront::models::Cart;
use shopwai_storefront::services::CatalogError;
use shopwai_storefront::state::AppState;

/// Show cart lines, line count and total.
///
/// # Errors
///
/// Returns an error if nobody is logged in.
pub fn show(state: &AppState) -> Result<String> {
    let user = state.session().require_any()?;
    let cart = state.carts().cart(&user.id)?;
    Ok(render(&cart, state.currency()))
}

/// Add one unit of a catalog product.
///
/// # Errors
///
/// Returns an error if nobody is logged in or the product does not exist.
pub fn add(state: &AppState, id: &ProductId) -> Result<String> {
    let user = state.session().require_any()?;
    let product = state
        .catalog()
        .get(id)?
        .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
    let cart = state.carts().add(&user.id, &product)?;
    Ok(render(&cart, state.currency()))
}

/// One more unit of a line.
///
/// # Errors
///
/// Returns an error if nobody is logged in.
pub fn increase(state: &AppState, id: &ProductId) -> Result<String> {
    let user = state.session().require_any()?;
    let cart = state.carts().increase(&user.id, id)?;
    Ok(render(&cart, state.currency()))
}

/// One less unit of a line.
///
/// # Errors
///
/// Returns an error if nobody is logged in.
pub fn decrease(state: &AppState, id: &ProductId) -> Result<String> {
    let user = state.session().require_any()?;
    let cart = state.carts().decrease(&user.id, id)?;
    Ok(render(&cart, state.currency()))
}

/// Drop a line.
///
/// # Errors
///
/// Returns an error if nobody is logged in.
pub fn remove(state: &AppState, id: &ProductId) -> Result<String> {
    let user = state.session().require_any()?;
    let cart = state.carts().remove(&user.id, id)?;
    Ok(render(&cart, state.currency()))
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if nobody is logged in.
pub fn clear(state: &AppState) -> Result<String> {
    let user = state.session().require_any()?;
    state.carts().clear(&user.id)?;
    Ok("Cart cleared.".to_string())
}

fn render(cart: &Cart, currency: CurrencyCode) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }
    let mut out = String::new();
    for item in cart.items() {
        let _ = writeln!(
            out,
            "{}\t{} x{}\t{}",
            item.product_id,
            item.product.name,
            item.quantity,
            item.line_total().display(currency)
        );
    }
    let lines = cart.line_count();
    let noun = if lines == 1 { "item" } else { "items" };
    let _ = writeln!(out, "{lines} {noun} in cart");
    let _ = write!(out, "Total: {}", cart.total().display(currency));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopwai_core::Role;

    use super::*;
    use crate::commands::{account, testing};

    #[test]
    fn test_cart_requires_login() {
        let state = testing::state();
        assert!(show(&state).is_err());
    }

    #[test]
    fn test_cart_flow() {
        let state = testing::state();
        account::register(&state, "João", "joao@x.org", "pw", "pw", Role::Customer).unwrap();
        let farinha = ProductId::new("1");

        add(&state, &farinha).unwrap();
        add(&state, &farinha).unwrap();
        let out = add(&state, &ProductId::new("2")).unwrap();
        assert_eq!(
            out,
            "1\tFarinha de Mandioca x2\tR$ 30.00\n\
             2\tBanana x1\tR$ 5.00\n\
             2 items in cart\n\
             Total: R$ 35.00"
        );

        let err = add(&state, &ProductId::new("nope")).unwrap_err();
        assert_eq!(err.user_message(), "Product nope not found");

        decrease(&state, &farinha).unwrap();
        remove(&state, &ProductId::new("2")).unwrap();
        assert!(show(&state).unwrap().ends_with("1 item in cart\nTotal: R$ 15.00"));

        assert_eq!(clear(&state).unwrap(), "Cart cleared.");
        assert_eq!(show(&state).unwrap(), "Your cart is empty.");
    }
}
