//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Health check
//!
//! # Catalog
//! GET    /api/products                - Product listing (?category=)
//! GET    /api/products/{id}           - Product detail
//!
//! # Cart (session)
//! GET    /api/cart                    - Cart contents and total
//! POST   /api/cart/add                - Add one unit
//! POST   /api/cart/update             - Change quantity by a delta
//! POST   /api/cart/remove             - Remove a line
//!
//! # Checkout
//! GET    /api/checkout                - Checkout state
//! POST   /api/checkout                - Place the order
//!
//! # Orders
//! GET    /api/orders                  - Order history, newest first
//! GET    /api/orders/{id}             - Order detail
//! DELETE /api/orders/{id}             - Delete an order
//! POST   /api/orders/{id}/status      - Change an order's status
//!
//! # Account
//! GET    /api/account                 - Current account (requires account)
//! POST   /api/account/register        - Create the local account
//! POST   /api/account/login           - Sign in by email
//! POST   /api/account/logout          - Remove the local account
//!
//! # Payment endpoint (CORS enabled)
//! POST   /api/payment                 - Register a payment
//! ```

pub mod account;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod payment;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show).delete(orders::delete))
        .route("/{id}/status", post(orders::update_status))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::show))
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/logout", post(account::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .route("/api/checkout", get(checkout::state).post(checkout::place_order))
        .nest("/api/orders", order_routes())
        .nest("/api/account", account_routes())
        .merge(payment::routes())
}

/// Build the full application: routes, session, request id and tracing.
///
/// Sentry layers are added by the binary, outside this stack.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    routes()
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
pub(crate) mod test_support {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Request, Response, header},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::StorefrontConfig;
    use crate::state::AppState;
    use crate::storage::MemoryStore;

    /// State over a memory store with an unreachable payment endpoint and no
    /// confirmation delay.
    pub fn state() -> AppState {
        let config = StorefrontConfig::from_lookup(|key| match key {
            // Port 9 (discard) refuses connections on test hosts.
            "PAYMENT_ENDPOINT_URL" => Some("http://127.0.0.1:9/api/payment".to_string()),
            "PAYMENT_TIMEOUT_SECS" => Some("5".to_string()),
            "CHECKOUT_CONFIRMATION_DELAY_MS" => Some("0".to_string()),
            _ => None,
        })
        .unwrap();
        AppState::new(config, Arc::new(MemoryStore::new())).unwrap()
    }

    pub fn app(state: &AppState) -> Router {
        super::app(state.clone())
    }

    pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    pub fn send_json(method: &str, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub async fn call(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    /// The `name=value` part of the session cookie set by a response.
    pub fn session_cookie(response: &Response<Body>) -> Option<String> {
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_owned)
    }

    pub async fn json_body(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
