//! Storefront services.
//!
//! - [`identity`] - the single local account
//! - [`orders`] - order history
//! - [`checkout`] - cart to order, through one payment attempt

pub mod checkout;
pub mod identity;
pub mod orders;

pub use checkout::{
    CheckoutError, CheckoutOptions, CheckoutOutcome, CheckoutReconciler, CheckoutSession,
    CheckoutState, PaymentPolicy, PaymentResolution,
};
pub use identity::IdentityStore;
pub use orders::OrderStore;
