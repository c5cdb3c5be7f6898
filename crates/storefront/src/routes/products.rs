//! Product listing handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::ProductFilter;
use crate::filters;
use crate::routes::cart::load_cart;
use crate::state::AppState;
use crate::views::ListingView;

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub listing: ListingView,
    pub badge: Option<String>,
}

/// Display the product listing.
///
/// `?search=` pre-fills the search box and filters by name.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<ProductFilter>,
) -> impl IntoResponse {
    let products = state.catalog().search(&filter).await;
    let cart = load_cart(&session).await;

    ProductsIndexTemplate {
        listing: ListingView::new(&products, &filter),
        badge: cart.badge(),
    }
}
