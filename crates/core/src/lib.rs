//! Shopwai Core - Shared types library.
//!
//! This crate provides the value types used by every Shopwai component:
//! - `storefront` - Account, catalog, cart and session stores
//! - `cli` - Command-line front end for vendors and customers
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. Anything
//! that crosses a store boundary is validated here first (emails, prices,
//! roles) so the stores only ever see well-formed values.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails and user roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

#[doc(hidden)]
pub use uuid;
