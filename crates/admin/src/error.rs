//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use techsolutions_api_client::ApiError;
use thiserror::Error;

/// Application-level error type for the admin dashboards.
///
/// Most handlers degrade to an empty table plus a notice instead of failing;
/// these variants cover what cannot be rendered at all.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operator lacks permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Api(api) = &self {
            let event_id = sentry::capture_error(api);
            tracing::error!(
                error = %api,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        match self {
            Self::Api(err) => (StatusCode::BAD_GATEWAY, err.user_message()),
            Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("No encontrado: {what}")),
            Self::Forbidden(reason) => (StatusCode::FORBIDDEN, reason),
        }
        .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
