//! # dailydose-core: Pure Business Logic for the Daily Dose Storefront
//!
//! This crate holds the storefront's business rules as plain functions and
//! types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Daily Dose Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    Storefront (axum)                            │    │
//! │  │   /api/menu ──► /api/cart ──► /api/checkout ──► /api/admin      │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │             ★ dailydose-core (THIS CRATE) ★                     │    │
//! │  │                                                                 │    │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐   │    │
//! │  │   │  money  │ │  cart   │ │ pricing │ │ receipt │ │validate │   │    │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘   │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                 dailydose-db (Database Layer)                   │    │
//! │  │            SQLite queries, migrations, repositories             │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Profile, etc.)
//! - [`money`] - Exact decimal money
//! - [`cart`] - The session cart
//! - [`pricing`] - Shipping + tax totals
//! - [`catalog`] - Menu search and inventory summary
//! - [`codes`] - Order codes and display numbers
//! - [`receipt`] - Order confirmation
//! - [`validation`] - Checkout and admin form rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dailydose_core::cart::Cart;
//! use dailydose_core::pricing::PricingPolicy;
//!
//! let cart = Cart::new();
//! let totals = PricingPolicy::default().price(cart.subtotal());
//! assert_eq!(totals.total.to_string(), "$3.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod codes;
pub mod error;
pub mod money;
pub mod pricing;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{PriceBreakdown, PricingPolicy};
pub use receipt::Receipt;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat shipping fee in cents ($3.99).
pub const DEFAULT_SHIPPING_MINOR: i64 = 399;

/// Sales tax in basis points (8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Catches a mistyped quantity (1000 instead of 10) before it reaches
/// checkout and the stock write.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest stock an admin may enter for one item.
pub const MAX_ITEM_STOCK: i64 = 1_000_000;

/// Largest unit price an admin may enter, in cents ($10,000.00).
pub const MAX_ITEM_PRICE_MINOR: i64 = 1_000_000;
