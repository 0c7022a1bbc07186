//! Core types for Boxpaper.
//!
//! This module provides type-safe wrappers and records for the storefront
//! domain: identifiers, money, the cart, orders and the local user.

pub mod cart;
pub mod id;
pub mod money;
pub mod order;
pub mod product;
pub mod status;
pub mod user;

pub use cart::{Cart, CartItem};
pub use id::{OrderId, ProductId, UserId};
pub use money::Money;
pub use order::{CustomerInfo, DeliveryAddress, Order};
pub use product::Product;
pub use status::{OrderStatus, PaymentMethod};
pub use user::User;
