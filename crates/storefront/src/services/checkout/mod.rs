//! Checkout reconciliation.
//!
//! Turns a cart, a checkout form and one payment attempt into a saved order.
//!
//! # States
//!
//! ```text
//! Idle ──checkout()──▶ Processing ──▶ Complete
//!   ▲                      │
//!   └──────── error ───────┘
//! ```
//!
//! State is tracked per session key: at most one checkout per session is in
//! flight, while different sessions check out independently. A checkout is
//! refused without any state change when the cart is empty, a required form
//! field is blank, or another checkout for the same session is in flight.
//!
//! Once `Processing`, exactly one payment request is sent; there is no retry
//! and no cancellation. The attempt runs on its own task, so a caller that
//! goes away (a client disconnecting mid-request) does not stop it: the order
//! is saved, the emptied cart is written back through [`CheckoutSession`] and
//! the session reaches `Complete` regardless.
//!
//! # Payment policy
//!
//! The payment result is kept as `Result<PaymentReceipt, PaymentError>` and a
//! [`PaymentPolicy`] decides what a failure means:
//!
//! - [`PaymentPolicy::Fallback`] completes the checkout anyway with a locally
//!   generated `ORDER-<unix millis>` id. This is the shipped behavior: a
//!   payment outage never blocks the customer. It also means a declined or
//!   lost payment looks like success from the storefront, which needs product
//!   sign-off before real money flows through it.
//! - [`PaymentPolicy::Strict`] fails the checkout and saves nothing.

mod error;

pub use error::CheckoutError;

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use sentry::SentryFutureExt;
use serde::Serialize;
use tracing::{Instrument, instrument};

use boxpaper_core::{Cart, CustomerInfo, Order, OrderId, PaymentMethod};

use crate::error::add_breadcrumb;
use crate::payment::{PaymentGateway, PaymentRequest};
use crate::services::orders::OrderStore;
use crate::storage;

/// What a failed payment means for the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentPolicy {
    /// Save a pending order under a local id and report success.
    #[default]
    Fallback,
    /// Fail the checkout and save nothing.
    Strict,
}

impl PaymentPolicy {
    /// Policy name as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fallback => "fallback",
            Self::Strict => "strict",
        }
    }
}

impl std::str::FromStr for PaymentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fallback" => Ok(Self::Fallback),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("invalid payment policy: {s} (expected fallback or strict)")),
        }
    }
}

/// Where a session is in its current attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CheckoutState {
    Idle,
    Processing,
    #[serde(rename_all = "camelCase")]
    Complete { order_id: OrderId },
}

/// How the payment side of a completed checkout went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PaymentResolution {
    /// The payment endpoint registered the payment.
    #[serde(rename_all = "camelCase")]
    Confirmed { payment_url: Option<String> },
    /// The payment endpoint failed; the order id was generated locally.
    Fallback { reason: String },
}

/// A completed checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutOutcome {
    pub order: Order,
    pub resolution: PaymentResolution,
}

/// Checkout settings.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutOptions {
    pub policy: PaymentPolicy,
    /// Pause before reporting completion. Cosmetic only.
    pub confirmation_delay: Duration,
}

impl Default for CheckoutOptions {
    fn default() -> Self {
        Self {
            policy: PaymentPolicy::Fallback,
            confirmation_delay: Duration::from_millis(1500),
        }
    }
}

/// Where the visitor's cart lives between requests.
///
/// A completed checkout writes the emptied cart back through this before the
/// session is marked `Complete`.
pub trait CheckoutSession: Send + 'static {
    type Error: Display + Send;

    /// Persist `cart` as the session's cart.
    fn store_cart(&self, cart: &Cart) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

type SessionStates = Arc<Mutex<HashMap<String, CheckoutState>>>;

/// Orchestrates checkout attempts, at most one in flight per session.
///
/// Cheap to clone; clones share the gateway, the order store and the
/// per-session states.
pub struct CheckoutReconciler<P> {
    inner: Arc<ReconcilerInner<P>>,
}

struct ReconcilerInner<P> {
    gateway: P,
    orders: OrderStore,
    options: CheckoutOptions,
    states: SessionStates,
}

impl<P> Clone for CheckoutReconciler<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: PaymentGateway + 'static> CheckoutReconciler<P> {
    /// Create a reconciler with every session `Idle`.
    #[must_use]
    pub fn new(gateway: P, orders: OrderStore, options: CheckoutOptions) -> Self {
        Self {
            inner: Arc::new(ReconcilerInner {
                gateway,
                orders,
                options,
                states: Arc::default(),
            }),
        }
    }

    /// Current state of the session identified by `session_key`.
    #[must_use]
    pub fn state(&self, session_key: &str) -> CheckoutState {
        lock_states(&self.inner.states)
            .get(session_key)
            .cloned()
            .unwrap_or(CheckoutState::Idle)
    }

    #[must_use]
    pub fn policy(&self) -> PaymentPolicy {
        self.inner.options.policy
    }

    /// Run one checkout attempt for the session identified by `session_key`.
    ///
    /// After validation the attempt runs on a spawned task and finishes even
    /// if this future is dropped. On success the order has been saved and the
    /// emptied cart stored through `session`. On any error nothing is saved
    /// and the session's cart is not touched.
    ///
    /// # Errors
    ///
    /// - `EmptyCart`, `MissingFields`, `AlreadyProcessing` - refused up front
    /// - `Payment` - the payment failed under [`PaymentPolicy::Strict`]
    /// - `Storage` - the order could not be written
    /// - `Interrupted` - the attempt's task panicked
    #[instrument(skip_all, fields(items = cart.items().len(), method = %payment_method))]
    pub async fn checkout<S: CheckoutSession>(
        &self,
        session_key: &str,
        session: S,
        cart: Cart,
        customer: CustomerInfo,
        payment_method: PaymentMethod,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let missing = customer.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        let guard = self.begin(session_key)?;
        let attempt = self
            .clone()
            .run(guard, session, cart, customer, payment_method)
            .in_current_span()
            .bind_hub(sentry::Hub::current());

        tokio::spawn(attempt)
            .await
            .map_err(|e| CheckoutError::Interrupted(e.to_string()))?
    }

    async fn run<S: CheckoutSession>(
        self,
        guard: ProcessingGuard,
        session: S,
        cart: Cart,
        customer: CustomerInfo,
        payment_method: PaymentMethod,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let inner = &self.inner;
        let items = cart.items().to_vec();
        let request = PaymentRequest {
            amount: cart.total(),
            payment_method,
            customer_info: customer.clone(),
            items: items.clone(),
        };
        add_breadcrumb(
            "checkout",
            "Payment requested",
            Some(&[("method", payment_method.as_str())]),
        );

        let now = Utc::now();
        let payment = inner.gateway.create_payment(&request).await;
        let (order_id, resolution) = match payment {
            Ok(receipt) => (
                receipt.order_id,
                PaymentResolution::Confirmed {
                    payment_url: receipt.payment_url,
                },
            ),
            Err(e) => match inner.options.policy {
                PaymentPolicy::Fallback => {
                    tracing::warn!(
                        error = %e,
                        "Payment failed, completing checkout with a local order id"
                    );
                    (
                        fallback_order_id(now),
                        PaymentResolution::Fallback {
                            reason: e.to_string(),
                        },
                    )
                }
                PaymentPolicy::Strict => {
                    tracing::warn!(error = %e, "Payment failed, checkout aborted");
                    return Err(CheckoutError::Payment(e));
                }
            },
        };

        let order = Order::new(
            order_id,
            now,
            items,
            payment_method,
            customer.delivery_address(),
        );
        let orders = inner.orders.clone();
        let saved = order.clone();
        storage::blocking(move || orders.save_order(&saved)).await??;

        if !inner.options.confirmation_delay.is_zero() {
            tokio::time::sleep(inner.options.confirmation_delay).await;
        }

        if let Err(e) = session.store_cart(&Cart::new()).await {
            tracing::error!(
                order_id = %order.order_id(),
                error = %e,
                "Order saved but the session cart could not be cleared"
            );
        }
        guard.complete(order.order_id().clone());

        tracing::info!(
            order_id = %order.order_id(),
            total = order.total_amount().units(),
            fallback = matches!(resolution, PaymentResolution::Fallback { .. }),
            "Checkout complete"
        );
        add_breadcrumb(
            "checkout",
            "Checkout complete",
            Some(&[("order_id", order.order_id().as_str())]),
        );

        Ok(CheckoutOutcome { order, resolution })
    }

    fn begin(&self, session_key: &str) -> Result<ProcessingGuard, CheckoutError> {
        let mut states = lock_states(&self.inner.states);
        if states.get(session_key) == Some(&CheckoutState::Processing) {
            return Err(CheckoutError::AlreadyProcessing);
        }
        states.insert(session_key.to_owned(), CheckoutState::Processing);
        Ok(ProcessingGuard {
            states: Arc::clone(&self.inner.states),
            session_key: session_key.to_owned(),
            completed: false,
        })
    }
}

fn lock_states(
    states: &Mutex<HashMap<String, CheckoutState>>,
) -> MutexGuard<'_, HashMap<String, CheckoutState>> {
    states.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds one session's `Processing` state for one attempt.
///
/// Dropping it without calling [`complete`](Self::complete) returns the
/// session to `Idle`, which covers errors and a panicking attempt.
struct ProcessingGuard {
    states: SessionStates,
    session_key: String,
    completed: bool,
}

impl ProcessingGuard {
    fn complete(mut self, order_id: OrderId) {
        lock_states(&self.states).insert(
            std::mem::take(&mut self.session_key),
            CheckoutState::Complete { order_id },
        );
        self.completed = true;
    }
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        if !self.completed {
            lock_states(&self.states).remove(&self.session_key);
        }
    }
}

/// Local order id used when the payment endpoint gives none.
fn fallback_order_id(now: DateTime<Utc>) -> OrderId {
    OrderId::new(format!("ORDER-{}", now.timestamp_millis()))
}
