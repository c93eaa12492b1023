//! # Admin Endpoints
//!
//! Inventory management plus read-only user and order listings. Every
//! handler takes [`AdminUser`], so a request without a session is
//! redirected and a customer session gets 403 before the body is read.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;

use dailydose_core::catalog::InventorySummary;
use dailydose_core::validation::{validate_item_form, ItemForm};
use dailydose_core::{Order, OrderItem, Product, ProductId, Role};

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub items: Vec<Product>,
    #[serde(flatten)]
    pub summary: InventorySummary,
}

/// A row of the users table.
#[derive(Debug, Serialize)]
pub struct UserEntry {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Inventory list with total stock and the five newest items.
pub async fn list_items(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let items = state.db.products().list().await?;
    let summary = InventorySummary::from_newest_first(&items);

    Ok(Json(InventoryResponse { items, summary }))
}

pub async fn create_item(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(form): Json<ItemForm>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let draft = validate_item_form(&form)?;
    let product = state.db.products().insert(&draft).await?;

    info!(admin = %admin.id, product_id = product.id, name = %product.name, "Item added");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Updates an item. A blank image keeps the stored one.
pub async fn update_item(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(form): Json<ItemForm>,
) -> Result<Json<Product>, ApiError> {
    let draft = validate_item_form(&form)?;
    let product = state.db.products().update(id, &draft).await?;

    info!(admin = %admin.id, product_id = id, "Item updated");
    Ok(Json(product))
}

pub async fn delete_item(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, ApiError> {
    state.db.products().delete(id).await?;

    info!(admin = %admin.id, product_id = id, "Item deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserEntry>>, ApiError> {
    let users = state
        .db
        .profiles()
        .list()
        .await?
        .into_iter()
        .map(|p| UserEntry {
            id: p.id,
            username: p.username,
            email: p.email,
            role: p.role,
        })
        .collect();

    Ok(Json(users))
}

/// Every order, newest first, each with its lines.
pub async fn list_orders(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderWithItems>>, ApiError> {
    let orders = state.db.orders().list().await?;

    let mut result = Vec::with_capacity(orders.len());
    for order in orders {
        let items = state.db.orders().items_for(order.id).await?;
        result.push(OrderWithItems { order, items });
    }

    Ok(Json(result))
}
