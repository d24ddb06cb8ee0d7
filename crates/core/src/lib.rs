//! Ether Craft Core - Shared catalog library.
//!
//! This crate provides the domain types and pure catalog logic used by the
//! Ether Craft components:
//! - `storefront` - Public-facing shop site
//! - `cli` - Build-time tooling
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Every grid the site renders is derived here from the loaded
//! product collection and the visitor's selector.
//!
//! # Modules
//!
//! - [`types`] - Products, categories, sort keys, prices, quantities
//! - [`catalog`] - Filtering, sorting, and the curated home page selection
//! - [`order`] - Order drafts and the order message
//! - [`session`] - Page session state and the action dispatch table

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod order;
pub mod session;
pub mod types;

pub use catalog::{CURATED_CAPS, ProductCollection, curate, select_and_order};
pub use order::{ContactDetails, GENERAL_INQUIRY_MESSAGE, OrderDraft, build_order_message};
pub use session::{Action, CatalogState, CatalogStore, CatalogView, Effect, FilterState};
pub use types::*;
