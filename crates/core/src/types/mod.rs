//! Core types for Ether Craft.
//!
//! This module provides type-safe wrappers for the catalog's domain concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;
pub mod sort;

pub use category::{Category, CategoryFilter, UnknownCategory};
pub use id::ProductId;
pub use price::Price;
pub use product::Product;
pub use quantity::Quantity;
pub use sort::SortKey;
