//! TechSolutions admin library.
//!
//! Product and promotion management, the manager dashboards and the payment
//! gateway panel. The binary wires tracing, Sentry and the listener around
//! [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod gateways;
pub mod manager;
pub mod middleware;
pub mod products;
pub mod promotions;
pub mod routes;
pub mod state;
pub mod views;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the admin router with security headers and tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(from_fn(middleware::security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
