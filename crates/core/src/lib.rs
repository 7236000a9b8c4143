//! Tote Core - Shared types library.
//!
//! This crate provides the types and pure collection logic used across all
//! Tote components:
//! - `storefront` - Stores, persistence, and the catalog client
//! - `cli` - The command-line view layer
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, quantities, and products
//! - [`cart`] - The shopping cart collection and its operations
//! - [`wishlist`] - The wishlist collection and its operations
//! - [`collection`] - The [`Collection`] trait both collections implement
//! - [`filter`] - Category and search filtering of product listings
//! - [`checkout`] - Order summary and local checkout receipt

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod collection;
pub mod filter;
pub mod types;
pub mod wishlist;

#[cfg(test)]
mod test_support;

pub use cart::{Cart, CartLine, CartOp};
pub use checkout::{OrderConfirmation, OrderSummary};
pub use collection::Collection;
pub use filter::ProductFilter;
pub use types::*;
pub use wishlist::{Wishlist, WishlistOp};
