//! Core types for Tienda.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod notice;
pub mod price;
pub mod product;

pub use cart::{Cart, CartLine};
pub use id::*;
pub use notice::CartNotice;
pub use price::{CurrencyCode, Price};
pub use product::Product;
