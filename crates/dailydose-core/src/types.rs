//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Product      │   │      Order      │   │   OrderItem     │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id             │   │  id             │   │  order_id (FK)  │        │
//! │  │  name, price    │   │  order_code     │   │  item_id (FK)   │        │
//! │  │  stock          │   │  status         │   │  item_name      │        │
//! │  │  category       │   │  total_price    │   │  unit_price     │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    TaxRate      │   │  OrderStatus    │   │ PaymentMethod   │        │
//! │  │  bps (u32)      │   │  Pending        │   │  CreditCard     │        │
//! │  │  800 = 8%       │   │  Completed      │   │  Paypal         │        │
//! │  └─────────────────┘   │  Cancelled      │   │  Cash           │        │
//! │                        └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Orders carry both a database `id` (used by `order_items.order_id`) and a
//! human-readable `order_code` (`ORD-<millis>-<n>`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

/// Identifier of a product row (`items.id`).
pub type ProductId = i64;

/// Identifier of an order row (`orders.id`).
pub type OrderId = i64;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (the storefront default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (800 bps → 0.08).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Category
// =============================================================================

/// Menu section a beverage is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Classic,
    Fruit,
    Specialty,
    Coffee,
}

impl Category {
    /// All categories in menu tab order.
    pub const ALL: [Category; 4] = [
        Category::Classic,
        Category::Fruit,
        Category::Specialty,
        Category::Coffee,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Classic => "classic",
            Category::Fruit => "fruit",
            Category::Specialty => "specialty",
            Category::Coffee => "coffee",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Category::Classic),
            "fruit" => Ok(Category::Fruit),
            "specialty" => Ok(Category::Specialty),
            "coffee" => Ok(Category::Coffee),
            _ => Err(ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A beverage on the menu.
///
/// The application only ever holds read snapshots; the `items` table is
/// the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    /// Public image URL (may be empty).
    pub image: String,
    /// Remaining units. Can be negative after oversold checkouts.
    pub stock: i64,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Stock badge shown on the menu card.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::for_stock(self.stock)
    }

    /// The menu disables "add to cart" for sold-out items.
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// Stock badge for a menu card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "remaining", rename_all = "snake_case")]
pub enum StockStatus {
    /// More than ten units left.
    InStock,
    /// Between one and ten units left.
    Low(i64),
    OutOfStock,
}

impl StockStatus {
    pub fn for_stock(stock: i64) -> Self {
        if stock > 10 {
            StockStatus::InStock
        } else if stock > 0 {
            StockStatus::Low(stock)
        } else {
            StockStatus::OutOfStock
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::InStock => f.write_str("In Stock"),
            StockStatus::Low(n) => write!(f, "Only {} left", n),
            StockStatus::OutOfStock => f.write_str("Out of Stock"),
        }
    }
}

/// Validated admin input for creating or updating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub stock: i64,
    pub category: Category,
    /// `None` keeps the existing image on update.
    pub image: Option<String>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// Checkout only ever writes `Pending`; later transitions belong to the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    /// Cash on delivery.
    Cash,
}

impl PaymentMethod {
    /// Label shown on the receipt.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Cash => "Cash on Delivery",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::CreditCard
    }
}

// =============================================================================
// Customer Details
// =============================================================================

/// The checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_code: String,
    pub user_name: String,
    pub status: OrderStatus,
    pub total_price: Money,
    pub created_at: DateTime<Utc>,
}

/// An order before the database has assigned its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_code: String,
    pub user_name: String,
    pub status: OrderStatus,
    pub total_price: Money,
}

// =============================================================================
// Order Item
// =============================================================================

/// A line of a placed order.
/// Uses snapshot pattern to freeze product data at time of purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: OrderId,
    pub item_id: ProductId,
    /// Product name at time of purchase (frozen).
    pub item_name: String,
    pub quantity: i64,
    /// Unit price at time of purchase (frozen).
    pub unit_price: Money,
}

impl OrderItem {
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// An order line ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub order_id: OrderId,
    pub item_id: ProductId,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

// =============================================================================
// Profiles
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

/// A user profile maintained by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Auth provider user id.
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
