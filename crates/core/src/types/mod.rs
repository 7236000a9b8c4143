//! Core types for Tote.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use id::*;
pub use price::{Price, PriceError, format_usd};
pub use product::{Product, Rating};
pub use quantity::{Quantity, QuantityError};
