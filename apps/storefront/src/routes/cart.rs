//! # Cart Endpoints
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐        │
//! │  │  Empty   │────►│ In Cart  │────►│ Receipt  │────►│ Finished │        │
//! │  │  Cart    │     │          │     │  shown   │     │ (empty)  │        │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘        │
//! │                        │                 │                              │
//! │                   add_item          place (checkout.rs)                 │
//! │                   update_item       close: cart kept                    │
//! │                   remove_item       finish: cart dropped                │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dailydose_core::{Cart, CartItem, CoreError, PriceBreakdown, PricingPolicy, ProductId};

use crate::auth::SessionUser;
use crate::error::ApiError;
use crate::AppState;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: PriceBreakdown,
    pub item_count: usize,
    /// Header badge count.
    pub total_quantity: i64,
}

impl CartResponse {
    pub fn new(cart: &Cart, pricing: &PricingPolicy) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: pricing.price(cart.subtotal()),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    #[serde(alias = "productId")]
    pub product_id: ProductId,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i64,
}

fn respond(state: &AppState, user: &SessionUser) -> Json<CartResponse> {
    let pricing = state.config.pricing();
    Json(state.carts.with_cart(&user.id, |cart| CartResponse::new(cart, &pricing)))
}

/// Gets the current cart contents.
pub async fn get_cart(State(state): State<AppState>, user: SessionUser) -> Json<CartResponse> {
    respond(&state, &user)
}

/// Adds one unit of a product.
///
/// The product is read from the database so the cart holds its current
/// name and price. Stock is not checked.
pub async fn add_item(
    State(state): State<AppState>,
    user: SessionUser,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(body.product_id)
        .await?
        .ok_or(CoreError::ProductNotFound(body.product_id))?;

    state
        .carts
        .with_cart_mut(&user.id, user.expires_at, |cart| cart.add(&product))?;
    debug!(user_id = %user.id, product_id = product.id, "Added to cart");

    Ok(respond(&state, &user))
}

/// Sets a line's quantity. Zero or less removes the line; more than
/// `MAX_ITEM_QUANTITY` is refused with 400.
pub async fn update_item(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<ProductId>,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    state.carts.with_cart_mut(&user.id, user.expires_at, |cart| {
        cart.update_quantity(id, body.quantity)
    })?;
    Ok(respond(&state, &user))
}

pub async fn remove_item(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<ProductId>,
) -> Json<CartResponse> {
    state
        .carts
        .with_cart_mut(&user.id, user.expires_at, |cart| cart.remove(id));
    respond(&state, &user)
}

pub async fn clear_cart(State(state): State<AppState>, user: SessionUser) -> Json<CartResponse> {
    state.carts.clear(&user.id);
    respond(&state, &user)
}
