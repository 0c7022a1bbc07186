//! Checkout error types.

use thiserror::Error;

use crate::payment::PaymentError;
use crate::storage::StorageError;

/// Errors that end a checkout attempt without an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Required contact or delivery fields are blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Another checkout for the same session is already in flight.
    #[error("a checkout is already being processed")]
    AlreadyProcessing,

    /// The payment failed and the strict payment policy is in effect.
    #[error("payment failed: {0}")]
    Payment(#[from] PaymentError),

    /// The order could not be saved.
    #[error("failed to save order: {0}")]
    Storage(#[from] StorageError),

    /// The task running the attempt panicked.
    #[error("checkout attempt interrupted: {0}")]
    Interrupted(String),
}

impl CheckoutError {
    /// Whether the attempt was refused before anything was sent.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::EmptyCart | Self::MissingFields(_) | Self::AlreadyProcessing
        )
    }
}
