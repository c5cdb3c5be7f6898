//! TechSolutions Storefront - Public e-commerce site.
//!
//! This binary serves the public storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with HTMX for interactivity
//! - Askama templates for server-side rendering
//! - Catalog from the seed list or the inventory service
//! - Payments simulated in-process or charged through the payment service

#![cfg_attr(not(test), forbid(unsafe_code))]

mod bootstrap;

use techsolutions_storefront::{app, config::StorefrontConfig, state::AppState};

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("invalid storefront configuration");
    let _telemetry = bootstrap::Telemetry::install(&config);

    tracing::info!(
        catalog = ?config.catalog_mode,
        payments = ?config.payment_mode,
        "Storefront configuration loaded"
    );

    let addr = config.socket_addr();
    let state = AppState::new(config).expect("failed to build storefront state");

    let router = app(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind storefront address");
    tracing::info!(%addr, "storefront listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(bootstrap::shutdown_signal())
        .await
        .expect("storefront server error");
}
