//! Application state shared across handlers.

use std::sync::Arc;

use techsolutions_api_client::{ApiClient, ApiError};
use tokio::sync::RwLock;

use crate::config::AdminConfig;
use crate::promotions::PromotionBook;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: ApiClient,
    promotions: RwLock<PromotionBook>,
}

impl AppState {
    /// Build state with the seeded promotions.
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL is unusable.
    pub fn new(config: AdminConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api_config())?;
        Ok(Self::with_parts(config, api, PromotionBook::seeded()))
    }

    #[must_use]
    pub fn with_parts(config: AdminConfig, api: ApiClient, promotions: PromotionBook) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                promotions: RwLock::new(promotions),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Inventory and payments API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn promotions(&self) -> &RwLock<PromotionBook> {
        &self.inner.promotions
    }
}
