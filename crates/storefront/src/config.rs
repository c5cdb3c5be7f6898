//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `TECHSOLUTIONS_API_URL` - Inventory and payments API (default: <http://127.0.0.1:8080>)
//! - `TECHSOLUTIONS_API_TOKEN` - Bearer token for the API
//! - `STOREFRONT_CATALOG_SOURCE` - `seed` or `remote` (default: seed)
//! - `STOREFRONT_PAYMENT_MODE` - `simulated` or `remote` (default: simulated)
//! - `CHECKOUT_STATUS_INTERVAL_MS` - Delay between processing messages (default: 600)
//! - `CHECKOUT_PROCESSING_MS` - Processing time before charging (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use techsolutions_api_client::ApiConfig;
use thiserror::Error;
use url::Url;

use crate::checkout::ProcessingTiming;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &["your-", "changeme", "replace", "placeholder", "xxx"];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Where listed products come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogMode {
    #[default]
    Seed,
    Remote,
}

impl FromStr for CatalogMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "seed" => Ok(Self::Seed),
            "remote" => Ok(Self::Remote),
            other => Err(format!("expected `seed` or `remote`, got `{other}`")),
        }
    }
}

/// How checkout charges are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMode {
    #[default]
    Simulated,
    Remote,
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "remote" => Ok(Self::Remote),
            other => Err(format!("expected `simulated` or `remote`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Inventory and payments API
    pub api: ApiSettings,
    pub catalog_mode: CatalogMode,
    pub payment_mode: PaymentMode,
    /// Checkout processing step timing
    pub timing: ProcessingTiming,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Backend API location and credentials.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ApiSettings {
    pub url: Url,
    pub token: Option<SecretString>,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("url", &self.url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ApiSettings {
    /// Load `TECHSOLUTIONS_API_URL` and `TECHSOLUTIONS_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse or the token looks
    /// like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = parse_env("TECHSOLUTIONS_API_URL", "http://127.0.0.1:8080")?;
        let token = get_optional_env("TECHSOLUTIONS_API_TOKEN")
            .map(|value| {
                validate_not_placeholder(&value, "TECHSOLUTIONS_API_TOKEN")?;
                Ok(SecretString::from(value))
            })
            .transpose()?;
        Ok(Self { url, token })
    }

    /// Client configuration for `techsolutions-api-client`.
    #[must_use]
    pub fn client_config(&self) -> ApiConfig {
        let config = ApiConfig::new(self.url.clone());
        match &self.token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        let api = ApiSettings::from_env()?;
        let catalog_mode = parse_env("STOREFRONT_CATALOG_SOURCE", "seed")?;
        let payment_mode = parse_env("STOREFRONT_PAYMENT_MODE", "simulated")?;

        let timing = ProcessingTiming {
            status_interval: Duration::from_millis(parse_env(
                "CHECKOUT_STATUS_INTERVAL_MS",
                "600",
            )?),
            total: Duration::from_millis(parse_env("CHECKOUT_PROCESSING_MS", "3000")?),
        };

        Ok(Self {
            host,
            port,
            base_url,
            api,
            catalog_mode,
            payment_mode,
            timing,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the session cookie should be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Reject values that are obviously copied from an example file.
fn validate_not_placeholder(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}
