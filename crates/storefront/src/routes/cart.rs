//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart lives in the visitor session and is reloaded on every request;
//! totals and the badge are always derived from the stored items.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use techsolutions_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{CartStore, SessionStorage, coupon};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;
use crate::views::{CartView, NotificationView, notifications};

/// The visitor's cart, loaded from the session.
pub async fn load_cart(session: &Session) -> CartStore<SessionStorage> {
    CartStore::load(SessionStorage::new(session.clone())).await
}

/// Project a cart store into its view.
pub fn cart_view(cart: &CartStore<SessionStorage>) -> CartView {
    CartView::new(cart.items(), cart.totals(), cart.item_count())
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Coupon form data.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    #[serde(default)]
    pub code: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub badge: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
    pub notifications: Vec<NotificationView>,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub badge: Option<String>,
    pub notifications: Vec<NotificationView>,
}

/// Notifications-only fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/notifications.html")]
pub struct NotificationsTemplate {
    pub notifications: Vec<NotificationView>,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    let view = cart_view(&cart);

    CartShowTemplate {
        badge: view.badge.clone(),
        cart: view,
    }
}

/// Add one unit of a product (HTMX).
///
/// Returns the new badge plus the toast, and triggers `cart-updated`.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .find(form.product_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("producto {}", form.product_id)))?;

    let mut cart = load_cart(&session).await;
    cart.add(product.to_cart_item()).await;
    add_breadcrumb("cart", &format!("Added {}", product.name));

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            badge: cart.badge(),
            notifications: notifications(cart.take_notifications()),
        },
    )
        .into_response())
}

/// Set a line's quantity (HTMX). Zero or less removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Response {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(form.product_id, form.quantity).await;
    items_fragment(&mut cart)
}

/// Remove a line (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Response {
    let mut cart = load_cart(&session).await;
    cart.remove(form.product_id).await;
    items_fragment(&mut cart)
}

/// Check a coupon code (HTMX).
#[instrument(skip(form))]
pub async fn coupon(Form(form): Form<CouponForm>) -> impl IntoResponse {
    NotificationsTemplate {
        notifications: vec![coupon::apply(&form.code).into()],
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartCountTemplate {
        badge: cart.badge(),
        notifications: Vec::new(),
    }
}

fn items_fragment(cart: &mut CartStore<SessionStorage>) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: cart_view(cart),
            notifications: notifications(cart.take_notifications()),
        },
    )
        .into_response()
}
