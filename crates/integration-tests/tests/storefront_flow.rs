//! End-to-end storefront flows against the file backend.
//!
//! Run with: cargo test -p shopwai-integration-tests

#![allow(clippy::unwrap_used)]

use shopwai_core::{Price, ProductId, Role};
use shopwai_integration_tests::{TestContext, register};
use shopwai_storefront::error::AppError;
use shopwai_storefront::models::ProductChanges;
use shopwai_storefront::services::{AuthError, CatalogError, Registration, SessionError};

fn price(s: &str) -> Price {
    Price::parse(s).unwrap()
}

// ============================================================================
// Accounts
// ============================================================================

#[test]
fn test_duplicate_registration_keeps_first_account() {
    let ctx = TestContext::new();
    let state = ctx.open();
    let first = register(&state, "Maria", "maria@aldeia.org", Role::Vendor);

    let err = state
        .accounts()
        .register(&Registration {
            name: "Outra Maria",
            email: "maria@aldeia.org",
            password: "x",
            password_confirmation: "x",
            role: Role::Customer,
        })
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateEmail));

    let reopened = ctx.open();
    let users = reopened.accounts().list().unwrap();
    assert_eq!(users, vec![first.clone()]);
    assert_eq!(
        reopened.accounts().find_by_email(" maria@aldeia.org ").unwrap(),
        Some(first)
    );
}

#[test]
fn test_password_is_not_stored_in_clear() {
    let ctx = TestContext::new();
    let state = ctx.open();
    let _user = register(&state, "Maria", "maria@aldeia.org", Role::Customer);

    let users = std::fs::read_to_string(ctx.file_for("users")).unwrap();
    assert!(!users.contains("\"password\""));
    assert!(users.contains("$argon2id$"));

    let session = std::fs::read_to_string(ctx.file_for("current_user")).unwrap();
    assert!(!session.contains("argon2"));
}

#[test]
fn test_login_survives_restart() {
    let ctx = TestContext::new();
    let user = register(&ctx.open(), "Maria", "maria@aldeia.org", Role::Vendor);
    ctx.open().session().logout().unwrap();

    ctx.open()
        .accounts()
        .login("maria@aldeia.org", "password", Role::Vendor)
        .unwrap();

    let current = ctx.open().session().current().unwrap().unwrap();
    assert_eq!(current.id, user.id);
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_samples_seeded_once() {
    let ctx = TestContext::new();
    let state = ctx.open();
    let ids: Vec<String> = state
        .catalog()
        .list()
        .unwrap()
        .into_iter()
        .map(|p| p.id.into_inner())
        .collect();
    assert_eq!(ids, ["1", "2"]);

    state.catalog().delete(&ProductId::new("1")).unwrap();
    assert_eq!(ctx.open().catalog().list().unwrap().len(), 1);
}

#[test]
fn test_vendor_crud_is_scoped_to_owner() {
    let ctx = TestContext::new();
    let state = ctx.open();
    let maria = register(&state, "Maria", "maria@aldeia.org", Role::Vendor);
    let jose = register(&state, "José", "jose@aldeia.org", Role::Vendor);

    let tapioca = state
        .catalog()
        .for_vendor(&maria.id)
        .create("Tapioca", "3,50", None)
        .unwrap();
    let queijo = state
        .catalog()
        .for_vendor(&jose.id)
        .create("Queijo Coalho", "22.00", Some("/queijo.png"))
        .unwrap();

    let mine = state.catalog().list_by_owner(&maria.id).unwrap();
    assert_eq!(mine, vec![tapioca.clone()]);

    let err = state
        .catalog()
        .for_vendor(&maria.id)
        .update(
            &queijo.id,
            &ProductChanges {
                name: "Queijo".to_string(),
                price: "1".to_string(),
                image: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotOwner(_)));

    let updated = state
        .catalog()
        .for_vendor(&maria.id)
        .update(
            &tapioca.id,
            &ProductChanges {
                name: "Tapioca de Coco".to_string(),
                price: "4.00".to_string(),
                image: None,
            },
        )
        .unwrap();
    assert_eq!(updated.owner_id, maria.id);

    state.catalog().for_vendor(&maria.id).delete(&tapioca.id).unwrap();

    let all = ctx.open().catalog().list().unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|p| p.id != tapioca.id));
    assert!(all.contains(&queijo));
}

#[test]
fn test_invalid_price_rejected() {
    let ctx = TestContext::new();
    let state = ctx.open();
    let maria = register(&state, "Maria", "maria@aldeia.org", Role::Vendor);

    let err = state
        .catalog()
        .for_vendor(&maria.id)
        .create("Caju", "-1", None)
        .unwrap_err();

    assert!(matches!(err, CatalogError::InvalidPrice(_)));
    assert_eq!(state.catalog().list().unwrap().len(), 2);
}

// ============================================================================
// Cart
// ============================================================================

#[test]
fn test_customer_cart_total_and_persistence() {
    let ctx = TestContext::new();
    let state = ctx.open();
    let joao = register(&state, "João", "joao@aldeia.org", Role::Customer);
    let catalog = state.catalog();
    let farinha = catalog.get(&ProductId::new("1")).unwrap().unwrap();
    let banana = catalog.get(&ProductId::new("2")).unwrap().unwrap();

    let carts = state.carts();
    carts.add(&joao.id, &farinha).unwrap();
    carts.add(&joao.id, &farinha).unwrap();
    carts.add(&joao.id, &banana).unwrap();

    let reopened = ctx.open();
    assert_eq!(reopened.carts().total(&joao.id).unwrap(), price("35.00"));
    assert_eq!(reopened.carts().item_count(&joao.id).unwrap(), 3);
    assert_eq!(
        reopened
            .carts()
            .total(&joao.id)
            .unwrap()
            .display(reopened.currency()),
        "R$ 35.00"
    );

    let cart = reopened.carts().decrease(&joao.id, &banana.id).unwrap();
    assert!(cart.get(&banana.id).is_none());
    assert_eq!(cart.total(), price("30.00"));
}

#[test]
fn test_cart_keeps_snapshot_after_catalog_edit() {
    let ctx = TestContext::new();
    let state = ctx.open();
    let joao = register(&state, "João", "joao@aldeia.org", Role::Customer);
    let farinha = state.catalog().get(&ProductId::new("1")).unwrap().unwrap();
    state.carts().add(&joao.id, &farinha).unwrap();

    state
        .catalog()
        .update(
            &farinha.id,
            &ProductChanges {
                name: farinha.name.clone(),
                price: "99".to_string(),
                image: farinha.image.clone(),
            },
        )
        .unwrap();
    state.catalog().delete(&ProductId::new("2")).unwrap();

    let cart = state.carts().cart(&joao.id).unwrap();
    assert_eq!(cart.total(), price("15.00"));
}

#[test]
fn test_carts_are_isolated_per_user() {
    let ctx = TestContext::new();
    let state = ctx.open();
    let ana = register(&state, "Ana", "ana@aldeia.org", Role::Customer);
    let beto = register(&state, "Beto", "beto@aldeia.org", Role::Customer);
    let banana = state.catalog().get(&ProductId::new("2")).unwrap().unwrap();

    state.carts().add(&ana.id, &banana).unwrap();

    assert!(state.carts().cart(&beto.id).unwrap().is_empty());
    assert!(ctx.file_for(&format!("cart_{}", ana.id)).exists());
    assert!(!ctx.file_for(&format!("cart_{}", beto.id)).exists());
}

// ============================================================================
// Session gating and storage failures
// ============================================================================

#[test]
fn test_customer_cannot_enter_vendor_panel() {
    let ctx = TestContext::new();
    let state = ctx.open();

    assert!(matches!(
        state.session().require_any(),
        Err(SessionError::NotLoggedIn)
    ));

    let _user = register(&state, "João", "joao@aldeia.org", Role::Customer);
    assert!(matches!(
        state.session().require_vendor(),
        Err(SessionError::Forbidden { role: Role::Customer })
    ));
}

#[test]
fn test_corrupt_collection_is_reported() {
    let ctx = TestContext::new();
    let state = ctx.open();
    std::fs::write(ctx.file_for("products"), "{not json").unwrap();

    let err = AppError::from(state.catalog().list().unwrap_err());

    assert!(err.is_internal());
    assert_eq!(err.user_message(), "Something went wrong, please try again");
    assert!(!err.user_message().contains("not json"));
}
