//! Integration tests for TechSolutions.
//!
//! Each test starts the real router on an ephemeral port and talks to it
//! over HTTP with a cookie-aware client, so sessions behave as they do in a
//! browser. The backend API is replaced by a `wiremock` server where needed.
//!
//! ```bash
//! cargo test -p techsolutions-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use reqwest::Client;
use techsolutions_admin::config::AdminConfig;
use techsolutions_admin::promotions::PromotionBook;
use techsolutions_api_client::{ApiClient, ApiConfig};
use techsolutions_core::UserRole;
use techsolutions_storefront::catalog::Catalog;
use techsolutions_storefront::checkout::{PaymentGateway, ProcessingTiming};
use techsolutions_storefront::config::{ApiSettings, CatalogMode, PaymentMode, StorefrontConfig};
use url::Url;

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// A router serving on a local port.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    /// Serve `app` on an ephemeral port for the rest of the test.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind(SocketAddr::new(LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Processing fast enough for a test to wait it out.
#[must_use]
pub const fn fast_timing() -> ProcessingTiming {
    ProcessingTiming {
        status_interval: Duration::from_millis(10),
        total: Duration::from_millis(50),
    }
}

/// Storefront configuration with the seed catalog and simulated payments.
///
/// # Panics
///
/// Panics if the placeholder API URL does not parse.
#[must_use]
pub fn storefront_config() -> StorefrontConfig {
    StorefrontConfig {
        host: LOCALHOST,
        port: 0,
        base_url: "http://localhost:3000".to_owned(),
        api: ApiSettings {
            url: Url::parse("http://127.0.0.1:9").expect("valid URL"),
            token: None,
        },
        catalog_mode: CatalogMode::Seed,
        payment_mode: PaymentMode::Simulated,
        timing: fast_timing(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Start the storefront with the seed catalog and `gateway`.
pub async fn spawn_storefront(gateway: Arc<dyn PaymentGateway>) -> TestServer {
    let state = techsolutions_storefront::state::AppState::with_parts(
        storefront_config(),
        Catalog::seeded(),
        gateway,
    );
    TestServer::spawn(techsolutions_storefront::app(state)).await
}

/// Admin configuration pointing at `api_url`.
#[must_use]
pub fn admin_config(api_url: Url, role: UserRole) -> AdminConfig {
    AdminConfig {
        host: LOCALHOST,
        port: 0,
        role,
        api_url,
        api_token: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Start the admin app against the API at `api_url`, with seeded promotions.
///
/// # Panics
///
/// Panics if the API client cannot be built for `api_url`.
pub async fn spawn_admin(api_url: &str, role: UserRole) -> TestServer {
    let url = Url::parse(api_url).expect("valid API URL");
    let api = ApiClient::new(&ApiConfig::new(url.clone())).expect("Failed to build API client");
    let state = techsolutions_admin::state::AppState::with_parts(
        admin_config(url, role),
        api,
        PromotionBook::seeded(),
    );
    TestServer::spawn(techsolutions_admin::app(state)).await
}
