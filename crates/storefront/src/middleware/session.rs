//! Session middleware configuration.
//!
//! Sessions live in memory and carry the visitor's cart. A restart empties
//! every cart; orders and the account are in the key-value store instead.
//! The session id also keys the visitor's checkout state.

use boxpaper_core::Cart;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;
use crate::services::CheckoutSession;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "bxp_session";

/// Session keys.
pub mod session_keys {
    /// The visitor's cart.
    pub const CART: &str = "cart";
}

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// # Arguments
///
/// * `config` - Storefront configuration (for the cookie `Secure` flag)
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Load the cart from the session.
///
/// A missing or undecodable cart is an empty cart.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable session cart");
            Cart::default()
        }
    }
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Key under which the visitor's checkout state is tracked.
///
/// A visitor without a stored session has no cart either, so the empty key
/// only ever reaches the empty-cart rejection.
#[must_use]
pub fn checkout_key(session: &Session) -> String {
    session.id().map(|id| id.to_string()).unwrap_or_default()
}

impl CheckoutSession for Session {
    type Error = tower_sessions::session::Error;

    /// Store the cart and write the session through to its store at once, so
    /// the change survives a request that was abandoned mid-checkout.
    async fn store_cart(&self, cart: &Cart) -> Result<(), Self::Error> {
        save_cart(self, cart).await?;
        self.save().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use boxpaper_core::{Money, Product, ProductId};
    use tower_sessions::SessionStore;

    use super::*;

    #[tokio::test]
    async fn test_store_cart_writes_through_to_the_store() {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store.clone(), None);

        let mut cart = Cart::new();
        cart.add(&Product {
            id: ProductId::new(4),
            name: "Стилус Pro".to_string(),
            category: "Стилусы".to_string(),
            price: Money::new(250),
            image: String::new(),
            badge: None,
        });
        session.store_cart(&cart).await.unwrap();

        let id = session.id().unwrap();
        assert_eq!(checkout_key(&session), id.to_string());

        let record = store.load(&id).await.unwrap().unwrap();
        let stored: Cart =
            serde_json::from_value(record.data[session_keys::CART].clone()).unwrap();
        assert_eq!(stored, cart);
    }

    #[test]
    fn test_checkout_key_without_session() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        assert_eq!(checkout_key(&session), "");
    }
}
