//! Role extractors for the dashboards.
//!
//! The operator's role comes from `ADMIN_ROLE`. Handlers that show financial
//! data take [`RequireFinanceAccess`], which refuses the request with 403 for
//! any other role.

use axum::{extract::FromRequestParts, http::request::Parts};
use techsolutions_core::UserRole;

use crate::error::AppError;
use crate::manager::finances::FinanceAccess;
use crate::state::AppState;

/// The configured operator role.
pub struct CurrentRole(pub UserRole);

impl FromRequestParts<AppState> for CurrentRole {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.config().role))
    }
}

/// Extractor that requires a role allowed to read financial reports.
///
/// # Example
///
/// ```rust,ignore
/// async fn finances(RequireFinanceAccess(access): RequireFinanceAccess) -> impl IntoResponse {
///     access.report(Period::Month)
/// }
/// ```
pub struct RequireFinanceAccess(pub FinanceAccess);

impl FromRequestParts<AppState> for RequireFinanceAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        FinanceAccess::grant(state.config().role)
            .map(Self)
            .map_err(|denied| AppError::Forbidden(denied.to_string()))
    }
}
