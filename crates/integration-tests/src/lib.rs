//! Integration tests for Boxpaper.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boxpaper-integration-tests
//! ```
//!
//! Every test starts its own storefront on an ephemeral local port with a
//! temporary data directory, so no external services are needed.
//!
//! # Test Categories
//!
//! - `checkout` - checkout against live, unreachable and declining payment
//!   endpoints
//! - `storefront` - catalog, session cart, orders and account over HTTP

use std::sync::Arc;

use axum::Router;
use boxpaper_storefront::config::StorefrontConfig;
use boxpaper_storefront::routes;
use boxpaper_storefront::services::OrderStore;
use boxpaper_storefront::state::AppState;
use boxpaper_storefront::storage::FileStore;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A storefront served on a local port.
pub struct TestServer {
    base_url: String,
    state: AppState,
    data_dir: TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a storefront with default settings, no confirmation delay and
    /// the given environment overrides.
    ///
    /// Unless overridden, checkout pays through this server's own
    /// `/api/payment`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start(overrides: &[(&str, &str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let base_url = format!("http://{addr}");
        let data_dir = tempfile::tempdir().expect("Failed to create data dir");

        let mut vars: Vec<(String, String)> = vec![
            ("STOREFRONT_BASE_URL".into(), base_url.clone()),
            ("STOREFRONT_PORT".into(), addr.port().to_string()),
            (
                "STOREFRONT_DATA_DIR".into(),
                data_dir.path().display().to_string(),
            ),
            ("PAYMENT_TIMEOUT_SECS".into(), "5".into()),
            ("CHECKOUT_CONFIRMATION_DELAY_MS".into(), "0".into()),
        ];
        vars.extend(overrides.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));

        // Later entries win, so overrides replace the defaults above.
        let config = StorefrontConfig::from_lookup(|key| {
            vars.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
        .expect("Invalid test configuration");

        let store = Arc::new(FileStore::new(config.data_dir.clone()));
        let state = AppState::new(config, store).expect("Failed to build state");
        let app = routes::app(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url,
            state,
            data_dir,
            handle,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// An order store reading the server's data directory directly.
    #[must_use]
    pub fn orders_on_disk(&self) -> OrderStore {
        OrderStore::new(Arc::new(FileStore::new(self.data_dir.path())))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve an arbitrary router on a local port and return its base URL.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
pub async fn spawn_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

/// HTTP client that keeps the session cookie between requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A complete checkout form body.
#[must_use]
pub fn checkout_form(payment_method: &str) -> serde_json::Value {
    serde_json::json!({
        "paymentMethod": payment_method,
        "customerInfo": {
            "fullName": "Иван Петров",
            "email": "ivan@example.com",
            "phone": "+79000000000",
            "address": "ул. Ленина, 1",
            "city": "Москва",
            "postalCode": "101000"
        }
    })
}
