//! Askama filters shared by the storefront templates.

use std::fmt::Display;

use chrono::Datelike;

/// Year on the server's local clock, for the footer.
///
/// `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_input: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(chrono::Local::now().year())
}
