//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    5.99 * 2 + 3.99 = 15.970000000000002  ❌ WRONG!                      │
//! │                                                                         │
//! │  Tax on a menu price is a fraction of a cent:                           │
//! │    11.98 × 8% = 0.9584                                                  │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals                                         │
//! │    Every amount is an exact `rust_decimal::Decimal`.                    │
//! │    Sums and tax stay exact; rounding happens ONLY for display.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dailydose_core::money::Money;
//!
//! let price = Money::from_minor(599); // 5.99
//! let line = price.multiply_quantity(2);
//! assert_eq!(line, Money::from_minor(1198));
//! assert_eq!(line.to_string(), "$11.98");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the shop's currency.
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price ──┬──► CartItem.price ──► line total (price × qty)       │
/// │                  │                                                      │
/// │                  └──► OrderItem.unit_price (frozen at purchase)         │
/// │                                                                         │
/// │  Cart.subtotal ──► PricingPolicy ──► shipping + tax ──► Order.total     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from minor units (cents).
    ///
    /// ## Example
    /// ```rust
    /// use dailydose_core::money::Money;
    ///
    /// let price = Money::from_minor(399);
    /// assert_eq!(price.to_string(), "$3.99");
    /// ```
    #[inline]
    pub fn from_minor(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Calculates tax for this amount without rounding.
    ///
    /// ## Example
    /// ```rust
    /// use dailydose_core::money::Money;
    /// use dailydose_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_minor(1198); // 11.98
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800));
    /// assert_eq!(tax.amount().normalize().to_string(), "0.9584");
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.as_fraction())
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Rounds to cents, half away from zero (how `toFixed(2)` reads to a customer).
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display rounds to two decimal places.
///
/// ## Note
/// Only presentation rounds; stored totals keep full precision.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_cents().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(599);
        assert_eq!(money.amount(), Decimal::new(599, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1099).to_string(), "$10.99");
        assert_eq!(Money::from_minor(500).to_string(), "$5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_display_rounds_fractional_cents() {
        // 16.9284 → 16.93, 0.9584 → 0.96
        let total = Money::new(Decimal::new(169284, 4));
        assert_eq!(total.to_string(), "$16.93");
        assert_eq!(Money::new(Decimal::new(9584, 4)).to_string(), "$0.96");
        assert_eq!(Money::new(Decimal::new(1005, 3)).to_string(), "$1.01");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!(a + b, Money::from_minor(1500));
        assert_eq!(a - b, Money::from_minor(500));
        assert_eq!(a * 3, Money::from_minor(3000));
    }

    #[test]
    fn test_decimal_sum_is_exact() {
        let items = [Money::from_minor(10), Money::from_minor(20)];
        let total: Money = items.into_iter().sum();
        assert_eq!(total, Money::from_minor(30));
    }

    #[test]
    fn test_tax_keeps_full_precision() {
        let subtotal = Money::from_minor(1198);
        let tax = subtotal.calculate_tax(TaxRate::from_bps(800));
        assert_eq!(tax.amount(), Decimal::new(9584, 4));
    }

    #[test]
    fn test_parse() {
        assert_eq!("5.99".parse::<Money>().unwrap(), Money::from_minor(599));
        assert_eq!(" 12 ".parse::<Money>().unwrap(), Money::from_minor(1200));
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_minor(-1).is_negative());
        assert!(!Money::from_minor(1).is_negative());
    }
}
