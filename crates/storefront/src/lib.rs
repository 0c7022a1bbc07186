//! Boxpaper storefront library.
//!
//! A small shop for phone cases, styluses and accessories: a static catalog,
//! a session cart, and a checkout that sends one payment request and then
//! records the order in local storage.
//!
//! # Modules
//!
//! - [`catalog`] - the fixed product list
//! - [`storage`] - key-value persistence (file or memory)
//! - [`payment`] - payment client and the payment endpoint
//! - [`services`] - identity, order history and checkout
//! - [`routes`] - the JSON HTTP API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod payment;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
