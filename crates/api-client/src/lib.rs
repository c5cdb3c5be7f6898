//! TechSolutions API client.
//!
//! Typed access to the backend's inventory (`/api/inventario`) and payments
//! (`/api/pagos`) endpoints. Used by the storefront (remote catalog and
//! remote payment mode), the admin dashboards and `ts-cli`.
//!
//! # Example
//!
//! ```rust,ignore
//! use techsolutions_api_client::{ApiClient, ApiConfig};
//!
//! let client = ApiClient::new(&ApiConfig::new("http://127.0.0.1:8080".parse()?))?;
//!
//! let products = client.list_products().await?;
//! let status = client.gateway_status().await?;
//! ```
//!
//! Calls are single-shot: no retries, no backoff. Callers decide how to
//! degrade when the backend is unreachable.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod error;
pub mod inventory;
pub mod payments;

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

pub use error::ApiError;
pub use inventory::{Ack, InventoryProduct, ProductInput, ProductSaved, StockAdjustment};
pub use payments::{ChargeReceipt, GatewayInfo, GatewayToggled, Verification};

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend root, e.g. `http://127.0.0.1:8080`.
    pub base_url: Url,
    /// Optional bearer token sent with every request.
    pub token: Option<SecretString>,
}

impl ApiConfig {
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }
}

/// Client for the TechSolutions backend API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

/// Error body shapes the backend returns (`{"mensaje": ...}` or
/// `{"error": ...}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    mensaje: Option<String>,
    error: Option<String>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base URL cannot carry a path,
    /// or [`ApiError::Http`] if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("techsolutions/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                token: config.token.clone(),
            }),
        })
    }

    /// Backend root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build an endpoint URL from path segments (each segment is encoded).
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        let builder = self.inner.client.request(method, url);
        match &self.inner.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a request and decode a JSON body.
    ///
    /// Non-2xx responses with a `mensaje`/`error` field become
    /// [`ApiError::Rejected`]; anything else becomes [`ApiError::Status`].
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn rejection(status: StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            mensaje: Some(message),
            ..
        })
        | Ok(ErrorBody {
            error: Some(message),
            ..
        }) => ApiError::Rejected(message),
        _ => ApiError::Status {
            status: status.as_u16(),
            message: body.to_owned(),
        },
    }
}
