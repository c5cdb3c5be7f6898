//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Checkout and cart refusals are not errors; they
//! render as notifications.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use techsolutions_api_client::ApiError;
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session store failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if !matches!(self, Self::NotFound(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match self {
            Self::Session(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno del servidor".to_owned(),
            ),
            Self::Api(err) => (StatusCode::BAD_GATEWAY, err.user_message()),
            Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("No encontrado: {what}")),
        }
        .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for visitor actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}
