//! Payment collaborator.
//!
//! Checkout sends exactly one request per attempt to an external payment
//! endpoint. This module holds both sides of that exchange:
//!
//! - [`PaymentGateway`] / [`HttpPaymentClient`] - the client used by checkout
//! - [`types`] - wire types shared by client and endpoint
//! - [`endpoint`] - request validation and receipt issuing for the
//!   `/api/payment` route
//!
//! The client reports what actually happened as
//! `Result<PaymentReceipt, PaymentError>`. Whether a failure blocks checkout is
//! decided one layer up, by the checkout payment policy.

mod client;
pub mod endpoint;
pub mod types;

pub use client::HttpPaymentClient;
pub use types::{CustomerSummary, PaymentRequest, PaymentResponse};

use std::future::Future;

use boxpaper_core::OrderId;
use thiserror::Error;

/// Errors that can occur when calling the payment endpoint.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The request never produced a response (connection refused, DNS,
    /// timeout, TLS).
    #[error("payment endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("payment endpoint returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message from the body, or a truncated body.
        message: String,
    },

    /// The response body was not a payment response.
    #[error("unparseable payment response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The endpoint answered `success: false`.
    #[error("payment declined: {}", .0.as_deref().unwrap_or("no reason given"))]
    Declined(Option<String>),

    /// The endpoint answered `success: true` without an order id.
    #[error("payment response is missing an order id")]
    MissingOrderId,
}

/// A successful payment registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Order id assigned by the payment endpoint.
    pub order_id: OrderId,
    /// Where the customer completes payment, if the endpoint provided one.
    pub payment_url: Option<String>,
}

/// Something that can register a payment for a checkout.
pub trait PaymentGateway: Send + Sync {
    /// Send one payment request.
    ///
    /// Implementations must not retry; checkout makes exactly one attempt.
    fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<PaymentReceipt, PaymentError>> + Send;
}
