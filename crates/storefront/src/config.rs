//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! ## Server
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://<host>:<port>`)
//! - `STOREFRONT_DATA_DIR` - Directory for local storage (default: .boxpaper)
//!
//! ## Checkout
//! - `PAYMENT_ENDPOINT_URL` - Payment endpoint (default: `<base url>/api/payment`)
//! - `PAYMENT_TIMEOUT_SECS` - Payment request timeout (default: none)
//! - `CHECKOUT_PAYMENT_POLICY` - `fallback` or `strict` (default: fallback)
//! - `CHECKOUT_CONFIRMATION_DELAY_MS` - Pause before confirming (default: 1500)
//!
//! ## Error tracking
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Environment tag (e.g. production)
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0 to 1.0 (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::services::{CheckoutOptions, PaymentPolicy};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Directory holding the local key-value store
    pub data_dir: PathBuf,
    /// Payment endpoint settings
    pub payment: PaymentConfig,
    /// Checkout behavior
    pub checkout: CheckoutOptions,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Payment endpoint settings.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub endpoint: Url,
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host: IpAddr = parse_env_or_default(&lookup, "STOREFRONT_HOST", "127.0.0.1")?;
        let port: u16 = parse_env_or_default(&lookup, "STOREFRONT_PORT", "3000")?;
        let base_url = parse_url(
            "STOREFRONT_BASE_URL",
            &get_env_or_default(&lookup, "STOREFRONT_BASE_URL", &format!("http://{host}:{port}")),
        )?;
        let data_dir = PathBuf::from(get_env_or_default(&lookup, "STOREFRONT_DATA_DIR", ".boxpaper"));

        let payment = PaymentConfig::from_lookup(&lookup, &base_url)?;

        let policy: PaymentPolicy =
            parse_env_or_default(&lookup, "CHECKOUT_PAYMENT_POLICY", "fallback")?;
        let delay_ms: u64 =
            parse_env_or_default(&lookup, "CHECKOUT_CONFIRMATION_DELAY_MS", "1500")?;
        let checkout = CheckoutOptions {
            policy,
            confirmation_delay: Duration::from_millis(delay_ms),
        };

        let sentry_sample_rate = parse_rate(&lookup, "SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = parse_rate(&lookup, "SENTRY_TRACES_SAMPLE_RATE", "0.1")?;

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            payment,
            checkout,
            sentry_dsn: get_optional_env(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional_env(&lookup, "SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

impl PaymentConfig {
    fn from_lookup(
        lookup: &impl Fn(&str) -> Option<String>,
        base_url: &Url,
    ) -> Result<Self, ConfigError> {
        let endpoint = match get_optional_env(lookup, "PAYMENT_ENDPOINT_URL") {
            Some(value) => parse_url("PAYMENT_ENDPOINT_URL", &value)?,
            None => base_url.join("/api/payment").map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
            })?,
        };

        let timeout = get_optional_env(lookup, "PAYMENT_TIMEOUT_SECS")
            .map(|value| {
                value.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar("PAYMENT_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self { endpoint, timeout })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(lookup, key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse a sample rate and check it lies in `0.0..=1.0`.
fn parse_rate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<f32, ConfigError> {
    let rate: f32 = parse_env_or_default(lookup, key, default)?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("{rate} is outside 0.0..=1.0"),
        ));
    }
    Ok(rate)
}
