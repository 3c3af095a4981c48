//! Shopwai storefront library.
//!
//! Accounts, catalog, carts and the login session of a small marketplace,
//! persisted to a key-value store. The `shopwai` CLI is a thin layer over
//! [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
