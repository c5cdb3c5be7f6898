//! HTTP middleware stack for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers (stricter than the storefront)
//!
//! Role checks are extractors, applied per handler.

pub mod auth;
pub mod security_headers;

pub use auth::{CurrentRole, RequireFinanceAccess};
pub use security_headers::security_headers;
