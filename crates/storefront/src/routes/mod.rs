//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /                       - Product listing (?search=&category=&price=)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (returns badge, triggers cart-updated)
//! POST /cart/update            - Set quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove line (returns cart_items fragment)
//! POST /cart/coupon            - Check a coupon code (returns notifications)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout (modal fragments)
//! POST /checkout/open          - Open at step 1
//! POST /checkout/method        - Select payment method
//! POST /checkout/continue      - Step 1 -> 2
//! POST /checkout/back          - Step 2 -> 1
//! POST /checkout/document      - Select factura / boleta
//! POST /checkout/contact       - Update contact fields (live validation)
//! POST /checkout/pay           - Step 2 -> 3, starts processing
//! GET  /checkout/status        - Poll step 3; moves to 4 or back to 2
//! POST /checkout/close         - Close from any step
//! ```

pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/coupon", post(cart::coupon))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/open", post(checkout::open))
        .route("/method", post(checkout::select_method))
        .route("/continue", post(checkout::continue_to_contact))
        .route("/back", post(checkout::back_to_payment))
        .route("/document", post(checkout::select_document))
        .route("/contact", post(checkout::update_contact))
        .route("/pay", post(checkout::pay))
        .route("/status", get(checkout::status))
        .route("/close", post(checkout::close))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
}
