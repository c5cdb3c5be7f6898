//! TechSolutions Admin - Internal dashboards.
//!
//! This binary serves the admin and manager dashboards on port 3001.
//!
//! # Security
//!
//! - Binds to 127.0.0.1 unless `ADMIN_HOST` says otherwise
//! - The operator role comes from `ADMIN_ROLE`; financial pages check it
//! - Every response carries no-store and anti-framing headers

#![cfg_attr(not(test), forbid(unsafe_code))]

mod bootstrap;

use techsolutions_admin::{app, config::AdminConfig, state::AppState};

#[tokio::main]
async fn main() {
    let config = AdminConfig::from_env().expect("invalid admin configuration");
    let _telemetry = bootstrap::Telemetry::install(&config);

    tracing::info!(
        role = %config.role,
        api = %config.api_url,
        "Admin configuration loaded"
    );

    let addr = config.socket_addr();
    let state = AppState::new(config).expect("failed to build admin state");

    let router = app(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind admin address");
    tracing::info!(%addr, "admin listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(bootstrap::shutdown_signal())
        .await
        .expect("admin server error");
}
