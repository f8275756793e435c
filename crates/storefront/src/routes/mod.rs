//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Featured products (home page data)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (?q= search, ?category=)
//! GET  /products/categories    - Distinct category list
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart view
//! POST /cart/add               - Add one unit of a product
//! POST /cart/update            - Change a line's quantity by a delta
//! POST /cart/remove            - Remove a line
//! GET  /cart/count             - Cart count badge value
//! ```
//!
//! All handlers speak JSON. Cart mutations return the refreshed cart view
//! plus an optional notice so the client can update the badge and show a
//! toast without further requests.

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/categories", get(products::categories))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
}
