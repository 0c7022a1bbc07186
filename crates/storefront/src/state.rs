//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::payment::{HttpPaymentClient, PaymentError};
use crate::services::{CheckoutReconciler, IdentityStore, OrderStore};
use crate::storage::KeyValueStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The identity and order stores
/// share one key-value store; the checkout reconciler tracks checkout state
/// per session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    identity: IdentityStore,
    orders: OrderStore,
    checkout: CheckoutReconciler<HttpPaymentClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `store` - Key-value store backing accounts and orders
    ///
    /// # Errors
    ///
    /// Returns an error if the payment HTTP client cannot be built.
    pub fn new(
        config: StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, PaymentError> {
        let identity = IdentityStore::new(Arc::clone(&store));
        let orders = OrderStore::new(store);
        let payment =
            HttpPaymentClient::new(config.payment.endpoint.clone(), config.payment.timeout)?;
        let checkout = CheckoutReconciler::new(payment, orders.clone(), config.checkout);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                identity,
                orders,
                checkout,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn identity(&self) -> &IdentityStore {
        &self.inner.identity
    }

    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutReconciler<HttpPaymentClient> {
        &self.inner.checkout
    }
}
