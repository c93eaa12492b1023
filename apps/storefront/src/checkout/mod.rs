//! # Order Placement
//!
//! Turns a cart snapshot and the customer's details into persisted rows.
//!
//! ## Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order()                                        │
//! │                                                                         │
//! │  1. validate_checkout ── Err ──► CoreError (no remote call made)        │
//! │         │                                                               │
//! │  2. order_code = ORD-<unix ms>-<0..=999>                                │
//! │         │                                                               │
//! │  3. insert_order ─────── Err ──► "Failed to save order."                │
//! │         │                                                               │
//! │  4. stock stage (pipeline.rs), one line at a time                       │
//! │         │ AbortAll + failure ──► "Failed to update stock."              │
//! │         │                                                               │
//! │  5. insert_order_items ─ Err ──► "Failed to save order items."          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  "Order placed successfully!"                                           │
//! │                                                                         │
//! │  Every step is its own write. Nothing is rolled back when a later       │
//! │  step fails.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod pipeline;
pub mod store;

use rand::Rng;
use serde::Serialize;
use tracing::{error, info, warn};

use dailydose_core::codes::generate_order_code;
use dailydose_core::validation::validate_checkout;
use dailydose_core::{
    CartItem, CoreError, CustomerDetails, NewOrder, NewOrderItem, OrderStatus, PriceBreakdown,
};

pub use pipeline::{run_stage, LinePolicy, LineStage, SkippedLine, StageReport, StockDecrement};
pub use store::OrderStore;

pub const ORDER_PLACED: &str = "Order placed successfully!";
pub const SAVE_ORDER_FAILED: &str = "Failed to save order.";
pub const UPDATE_STOCK_FAILED: &str = "Failed to update stock.";
pub const SAVE_ITEMS_FAILED: &str = "Failed to save order items.";

/// Shown when the customer finishes from the receipt.
pub const FINISH_MESSAGE: &str = "Thank you for your order. It will be ready soon!";

/// Result of a placement attempt that got past validation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementOutcome {
    pub success: bool,
    pub message: String,
    /// Set once the order row exists, even if a later step failed.
    pub order_code: Option<String>,
    pub stock: StageReport,
}

impl PlacementOutcome {
    fn failed(message: &str, order_code: Option<String>, stock: StageReport) -> Self {
        PlacementOutcome {
            success: false,
            message: message.to_string(),
            order_code,
            stock,
        }
    }
}

/// Places an order for `lines`.
///
/// ## Arguments
/// * `store` - where the order, stock and lines are written
/// * `customer` - the checkout form
/// * `lines` - the cart snapshot, in cart order
/// * `totals` - totals already computed for `lines`
/// * `policy` - what the stock stage does on a failing line
/// * `now_millis` / `rng` - inputs of the order code
///
/// ## Returns
/// * `Err(CoreError)` - validation failed; nothing was written
/// * `Ok(outcome)` - the sequence ran; `outcome.success` says how far it got
pub async fn place_order<S, R>(
    store: &S,
    customer: &CustomerDetails,
    lines: &[CartItem],
    totals: &PriceBreakdown,
    policy: LinePolicy,
    now_millis: i64,
    rng: &mut R,
) -> Result<PlacementOutcome, CoreError>
where
    S: OrderStore + ?Sized,
    R: Rng + Send + ?Sized,
{
    validate_checkout(customer, lines.len())?;

    let order_code = generate_order_code(now_millis, rng);

    let new_order = NewOrder {
        order_code: order_code.clone(),
        user_name: customer.name.trim().to_string(),
        status: OrderStatus::Pending,
        total_price: totals.total,
    };

    let order = match store.insert_order(&new_order).await {
        Ok(order) => order,
        Err(e) => {
            error!(%order_code, error = %e, "Order insert failed");
            return Ok(PlacementOutcome::failed(
                SAVE_ORDER_FAILED,
                None,
                StageReport::default(),
            ));
        }
    };

    let stock = run_stage(&StockDecrement::new(store), lines, policy).await;
    if stock.aborted {
        warn!(%order_code, order_id = order.id, "Stock stage aborted, order items not written");
        return Ok(PlacementOutcome::failed(
            UPDATE_STOCK_FAILED,
            Some(order_code),
            stock,
        ));
    }

    let items: Vec<NewOrderItem> = lines
        .iter()
        .map(|line| NewOrderItem {
            order_id: order.id,
            item_id: line.id,
            item_name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.price,
        })
        .collect();

    if let Err(e) = store.insert_order_items(&items).await {
        error!(%order_code, order_id = order.id, error = %e, "Order items insert failed");
        return Ok(PlacementOutcome::failed(
            SAVE_ITEMS_FAILED,
            Some(order_code),
            stock,
        ));
    }

    info!(
        %order_code,
        order_id = order.id,
        lines = items.len(),
        skipped = stock.skipped.len(),
        total = %totals.total,
        "Order placed"
    );

    Ok(PlacementOutcome {
        success: true,
        message: ORDER_PLACED.to_string(),
        order_code: Some(order_code),
        stock,
    })
}
