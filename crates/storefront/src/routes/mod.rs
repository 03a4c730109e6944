//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (best sellers, ?category=)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (?category=)
//! GET  /products/{id}          - Product detail with option selection
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (product_id, option.<name>, return_to)
//! POST /cart/remove            - Remove one unit (product_id, option.<name>)
//! POST /cart/clear             - Empty the cart
//!
//! # Checkout
//! GET  /checkout               - Order summary and shipping form
//! POST /checkout               - Validate, confirm, clear cart
//!
//! # Wishlist
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/toggle        - Add or remove (product_id, return_to)
//! POST /wishlist/remove        - Remove (product_id)
//! ```

pub mod cart;
pub mod checkout;
pub mod forms;
pub mod home;
pub mod products;
pub mod views;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
        .route("/remove", post(wishlist::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .nest("/wishlist", wishlist_routes())
}
