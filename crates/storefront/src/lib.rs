//! Tote storefront client library.
//!
//! Holds the persisted shopping cart and wishlist, the on-device storage they
//! live in, and the catalog client that supplies products. Front ends (the
//! `tote` CLI, tests) drive everything through [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod stores;

#[cfg(test)]
mod test_support;
