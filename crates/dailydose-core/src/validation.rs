//! # Validation Module
//!
//! Input validation for the two forms the storefront accepts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum)                                           │
//! │  └── Type validation (JSON deserialization)                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── validate_checkout: required fields + non-empty cart                │
//! │  ├── validate_quantity: cart line quantity 1..=999                      │
//! │  └── validate_item_form: admin add/edit item                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL / CHECK constraints                                       │
//! │  └── Foreign key constraints                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dailydose_core::types::CustomerDetails;
//! use dailydose_core::validation::validate_checkout;
//!
//! let blank = CustomerDetails::default();
//! assert!(validate_checkout(&blank, 1).is_err());
//! ```

use serde::Deserialize;
use std::str::FromStr;

use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::types::{Category, CustomerDetails, ProductDraft};
use crate::{MAX_ITEM_PRICE_MINOR, MAX_ITEM_QUANTITY, MAX_ITEM_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Checkout
// =============================================================================

/// Validates the checkout form before any database call.
///
/// ## Rules
/// - name, email, phone and address must be non-blank
/// - The cart must have at least one line
/// - email must contain `@` (the browser's `type="email"` check)
///
/// Missing fields are reported first and listed together, then an empty cart.
pub fn validate_checkout(customer: &CustomerDetails, cart_lines: usize) -> Result<(), CoreError> {
    let missing: Vec<String> = [
        ("name", &customer.name),
        ("email", &customer.email),
        ("phone", &customer.phone),
        ("address", &customer.address),
    ]
    .iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field.to_string())
    .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing }.into());
    }

    if cart_lines == 0 {
        return Err(CoreError::EmptyCart);
    }

    if !customer.email.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be an email address".to_string(),
        }
        .into());
    }

    Ok(())
}

// =============================================================================
// Cart Quantity
// =============================================================================

/// Validates the quantity of a cart line.
///
/// ## Rules
/// - Must be at least 1 (callers treat ≤ 0 as "remove the line")
/// - Must not exceed [`MAX_ITEM_QUANTITY`] (999)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

// =============================================================================
// Admin Item Form
// =============================================================================

/// The admin add/edit item form as submitted.
///
/// Numbers arrive as text, exactly as typed into the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub category: String,
    /// Public image URL. Blank or missing keeps the current image on edit.
    #[serde(default)]
    pub image: Option<String>,
}

/// Parses an admin item form.
///
/// ## Rules
/// - name is required
/// - price parses as a decimal in 0..=$10,000
/// - stock parses as an integer in 0..=[`MAX_ITEM_STOCK`]
/// - category is one of classic, fruit, specialty, coffee
///
/// Any failure maps to [`CoreError::InvalidItemData`] ("Invalid item data.").
pub fn validate_item_form(form: &ItemForm) -> Result<ProductDraft, CoreError> {
    parse_item_form(form).map_err(CoreError::InvalidItemData)
}

fn parse_item_form(form: &ItemForm) -> ValidationResult<ProductDraft> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    let price = Money::from_str(&form.price).map_err(|e| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: e.to_string(),
    })?;
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    if price > Money::from_minor(MAX_ITEM_PRICE_MINOR) {
        return Err(ValidationError::OutOfRange {
            field: "price (cents)".to_string(),
            min: 0,
            max: MAX_ITEM_PRICE_MINOR,
        });
    }

    let stock: i64 = form
        .stock
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ValidationError::InvalidFormat {
            field: "stock".to_string(),
            reason: e.to_string(),
        })?;
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    if stock > MAX_ITEM_STOCK {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_ITEM_STOCK,
        });
    }

    let category = Category::from_str(&form.category)?;

    let image = form
        .image
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string);

    Ok(ProductDraft {
        name: name.to_string(),
        description: form.description.trim().to_string(),
        price,
        stock,
        category,
        image,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
