//! # Error Types
//!
//! Domain-specific error types for dailydose-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dailydose-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  dailydose-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  storefront errors (in app)                                             │
//! │  └── ApiError         - What the HTTP client sees (JSON)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was submitted with nothing in the cart.
    ///
    /// ## When This Occurs
    /// - The customer opens checkout in a second tab after finishing an order
    /// - A client posts to the checkout endpoint directly
    #[error("Your cart is empty")]
    EmptyCart,

    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Product ID doesn't exist in the `items` table
    /// - An admin deleted the product while it sat in someone's cart
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// The admin item form did not parse.
    #[error("Invalid item data.")]
    InvalidItemData(#[source] ValidationError),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any database call.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Several required fields are missing at once (checkout form).
    #[error("Please fill in all required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., price that isn't a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {}", allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::EmptyCart.to_string(), "Your cart is empty");
        assert_eq!(
            CoreError::ProductNotFound(7).to_string(),
            "Product not found: 7"
        );
    }

    #[test]
    fn test_invalid_item_data_hides_detail() {
        let err = CoreError::InvalidItemData(ValidationError::Negative {
            field: "stock".to_string(),
        });
        assert_eq!(err.to_string(), "Invalid item data.");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MissingFields {
            fields: vec!["email".to_string(), "address".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: email, address"
        );

        let err = ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: vec!["classic".to_string(), "fruit".to_string()],
        };
        assert_eq!(err.to_string(), "category must be one of: classic, fruit");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "name is required");
    }
}
