//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with in-memory store, holds the cart)
//!
//! The payment endpoint additionally sits behind a permissive CORS layer.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::RequireUser;
pub use request_id::{RequestId, request_id_middleware};
pub use session::{checkout_key, create_session_layer, load_cart, save_cart};
