//! Boxpaper Core - Shared domain types.
//!
//! This crate provides the types used across all Boxpaper components:
//! - `storefront` - Catalog, cart, checkout and order history service
//! - `cli` - Command-line tools for inspecting the local store
//!
//! # Architecture
//!
//! The core crate contains only types and the pure logic attached to them
//! (cart invariants, order totals, form validation). No I/O, no storage, no
//! HTTP clients.
//!
//! # Modules
//!
//! - [`types`] - IDs, money, statuses, cart, orders and the local user

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
