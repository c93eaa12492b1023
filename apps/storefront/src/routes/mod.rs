//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /health                       none     health.rs                │
//! │  GET    /api/menu?q=&category=        none     menu.rs                  │
//! │  GET    /api/cart                     session  cart.rs                  │
//! │  DELETE /api/cart                     session                           │
//! │  POST   /api/cart/items               session                           │
//! │  PUT    /api/cart/items/{id}          session                           │
//! │  DELETE /api/cart/items/{id}          session                           │
//! │  POST   /api/checkout                 session  checkout.rs              │
//! │  POST   /api/checkout/finish          session                           │
//! │  GET    /api/admin/items              admin    admin.rs                 │
//! │  POST   /api/admin/items              admin                             │
//! │  PUT    /api/admin/items/{id}         admin                             │
//! │  DELETE /api/admin/items/{id}         admin                             │
//! │  GET    /api/admin/users              admin                             │
//! │  GET    /api/admin/orders             admin                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod menu;

use axum::http::Method;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api = Router::new()
        .route("/menu", get(menu::list_menu))
        .route("/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/cart/items", post(cart::add_item))
        .route(
            "/cart/items/{id}",
            put(cart::update_item).delete(cart::remove_item),
        )
        .route("/checkout", post(checkout::place))
        .route("/checkout/finish", post(checkout::finish))
        .route(
            "/admin/items",
            get(admin::list_items).post(admin::create_item),
        )
        .route(
            "/admin/items/{id}",
            put(admin::update_item).delete(admin::delete_item),
        )
        .route("/admin/users", get(admin::list_users))
        .route("/admin/orders", get(admin::list_orders));

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
