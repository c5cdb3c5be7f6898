//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use techsolutions_api_client::{ApiClient, ApiError};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogSource};
use crate::checkout::{Checkout, PaymentGateway, ProcessingTiming, RemoteGateway, SimulatedGateway};
use crate::config::{CatalogMode, PaymentMode, StorefrontConfig};

/// Abandoned checkouts are dropped (and their processing task aborted)
/// after this much inactivity.
const CHECKOUT_IDLE: Duration = Duration::from_secs(30 * 60);

/// A visitor's open checkout.
pub type SharedCheckout = Arc<Mutex<Checkout>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, the payment gateway and open checkouts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    gateway: Arc<dyn PaymentGateway>,
    checkouts: Cache<Uuid, SharedCheckout>,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL is unusable.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let needs_api = config.catalog_mode == CatalogMode::Remote
            || config.payment_mode == PaymentMode::Remote;
        let client = if needs_api {
            Some(ApiClient::new(&config.api.client_config())?)
        } else {
            None
        };

        let catalog = match (&client, config.catalog_mode) {
            (Some(client), CatalogMode::Remote) => {
                Catalog::new(CatalogSource::Remote(client.clone()))
            }
            _ => Catalog::seeded(),
        };
        let gateway: Arc<dyn PaymentGateway> = match (client, config.payment_mode) {
            (Some(client), PaymentMode::Remote) => Arc::new(RemoteGateway::new(client)),
            _ => Arc::new(SimulatedGateway::new()),
        };

        Ok(Self::with_parts(config, catalog, gateway))
    }

    /// Build state from explicit parts.
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        catalog: Catalog,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let checkouts = Cache::builder()
            .max_capacity(10_000)
            .time_to_idle(CHECKOUT_IDLE)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                gateway,
                checkouts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Gateway charged at the end of checkout processing.
    #[must_use]
    pub fn gateway(&self) -> Arc<dyn PaymentGateway> {
        Arc::clone(&self.inner.gateway)
    }

    #[must_use]
    pub fn timing(&self) -> ProcessingTiming {
        self.inner.config.timing
    }

    /// Register a new checkout and return its id.
    pub async fn insert_checkout(&self, checkout: Checkout) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .checkouts
            .insert(id, Arc::new(Mutex::new(checkout)))
            .await;
        id
    }

    pub async fn checkout(&self, id: Uuid) -> Option<SharedCheckout> {
        self.inner.checkouts.get(&id).await
    }

    /// Forget a checkout, handing it back for teardown.
    pub async fn remove_checkout(&self, id: Uuid) -> Option<SharedCheckout> {
        self.inner.checkouts.remove(&id).await
    }
}
