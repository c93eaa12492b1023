//! Checkout and the receipt's finish action.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use dailydose_core::{CustomerDetails, Receipt};

use crate::auth::SessionUser;
use crate::checkout::{place_order, PlacementOutcome, FINISH_MESSAGE};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    #[serde(flatten)]
    pub outcome: PlacementOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
    /// Plain-text rendering of `receipt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FinishResponse {
    pub message: &'static str,
}

/// Places the order for the session's cart.
///
/// The cart is left untouched: closing the receipt keeps it, and only
/// [`finish`] clears it.
///
/// ## Responses
/// * 200 - order placed, receipt attached
/// * 400 - empty cart or incomplete form; nothing written
/// * 500 - a write failed; `message` names the step
pub async fn place(
    State(state): State<AppState>,
    user: SessionUser,
    Json(customer): Json<CustomerDetails>,
) -> Result<Response, ApiError> {
    let cart = state.carts.snapshot(&user.id);
    let totals = state.config.pricing().price(cart.subtotal());
    let mut rng = StdRng::from_entropy();

    let outcome = place_order(
        &state.db,
        &customer,
        cart.items(),
        &totals,
        state.config.line_policy,
        Utc::now().timestamp_millis(),
        &mut rng,
    )
    .await?;

    if !outcome.success {
        let body = CheckoutResponse {
            outcome,
            receipt: None,
            receipt_text: None,
        };
        return Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response());
    }

    let receipt = Receipt::compose(cart.items(), totals, &customer, Local::now(), &mut rng);
    info!(
        user_id = %user.id,
        order_number = %receipt.order_number,
        ready = %receipt.ready,
        "Receipt issued"
    );

    let body = CheckoutResponse {
        outcome,
        receipt_text: Some(receipt.to_string()),
        receipt: Some(receipt),
    };
    Ok(Json(body).into_response())
}

/// The receipt's "finish" button: drops the cart.
pub async fn finish(State(state): State<AppState>, user: SessionUser) -> Json<FinishResponse> {
    state.carts.clear(&user.id);
    Json(FinishResponse {
        message: FINISH_MESSAGE,
    })
}
