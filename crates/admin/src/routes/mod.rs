//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//! GET  /                                - Redirect to /products
//!
//! # Products (inventory API)
//! GET  /products                        - Listing with stats (?search=&category=)
//! GET  /products/new                    - New product form
//! POST /products                        - Create product
//! GET  /products/{id}                   - Edit form
//! POST /products/{id}                   - Update product
//! POST /products/{id}/delete            - Delete product
//!
//! # Promotions (in memory)
//! GET  /promotions                      - Listing, stats and create form
//! POST /promotions                      - Create promotion
//! POST /promotions/{id}/delete          - Delete promotion
//!
//! # Manager
//! GET  /manager/sales                   - Sales summary (?period=)
//! GET  /manager/finances                - Income statement (gerente / contador)
//! GET  /manager/inventory               - Stock levels (?search=&level=)
//! GET  /manager/inventory/{code}/restock - Restock form
//! POST /manager/inventory/{code}/restock - Send restock request
//!
//! # Payment gateways (payments API)
//! GET  /gateways                        - Gateway panel
//! POST /gateways/{id}/toggle            - Enable / disable
//! POST /gateways/charge                 - Manual charge
//! POST /gateways/verify                 - Transaction lookup
//! ```

pub mod gateways;
pub mod manager;
pub mod products;
pub mod promotions;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new_product))
        .route("/{id}", get(products::edit).post(products::update))
        .route("/{id}/delete", post(products::delete))
}

fn promotion_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(promotions::index).post(promotions::create))
        .route("/{id}/delete", post(promotions::delete))
}

fn manager_routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(manager::sales))
        .route("/finances", get(manager::finances))
        .route("/inventory", get(manager::inventory))
        .route(
            "/inventory/{code}/restock",
            get(manager::restock_form).post(manager::restock_submit),
        )
}

fn gateway_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(gateways::index))
        .route("/charge", post(gateways::charge))
        .route("/verify", post(gateways::verify))
        .route("/{id}/toggle", post(gateways::toggle))
}

/// Create all routes for the admin dashboards.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .nest("/products", product_routes())
        .nest("/promotions", promotion_routes())
        .nest("/manager", manager_routes())
        .nest("/gateways", gateway_routes())
}
