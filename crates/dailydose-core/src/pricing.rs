//! # Pricing
//!
//! Turns a cart subtotal into the totals shown at checkout.
//!
//! ```text
//! subtotal ──┬──────────────────────────────► subtotal
//!            ├──► × tax_rate ───────────────► tax       (unrounded)
//!            │                                shipping  (flat fee)
//!            └──► subtotal + shipping + tax ► total
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::TaxRate;
use crate::{DEFAULT_SHIPPING_MINOR, DEFAULT_TAX_RATE_BPS};

/// Shipping fee and tax rate applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub shipping: Money,
    pub tax_rate: TaxRate,
}

impl PricingPolicy {
    pub fn new(shipping: Money, tax_rate: TaxRate) -> Self {
        PricingPolicy { shipping, tax_rate }
    }

    /// Computes the breakdown for `subtotal`.
    ///
    /// ## Example
    /// ```rust
    /// use dailydose_core::money::Money;
    /// use dailydose_core::pricing::PricingPolicy;
    ///
    /// let totals = PricingPolicy::default().price(Money::from_minor(1198));
    /// assert_eq!(totals.tax.amount().normalize().to_string(), "0.9584");
    /// assert_eq!(totals.total.amount().normalize().to_string(), "16.9284");
    /// ```
    pub fn price(&self, subtotal: Money) -> PriceBreakdown {
        let tax = subtotal.calculate_tax(self.tax_rate);
        PriceBreakdown {
            subtotal,
            shipping: self.shipping,
            tax,
            total: subtotal + self.shipping + tax,
        }
    }
}

impl Default for PricingPolicy {
    /// $3.99 shipping, 8% tax.
    fn default() -> Self {
        PricingPolicy {
            shipping: Money::from_minor(DEFAULT_SHIPPING_MINOR),
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
        }
    }
}

/// Checkout totals. Amounts keep full precision; round only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_single_line_cart_totals() {
        // [{price 5.99, qty 2}], shipping 3.99, 8% tax
        let subtotal = Money::from_minor(599).multiply_quantity(2);
        let totals = PricingPolicy::default().price(subtotal);

        assert_eq!(totals.subtotal.amount(), Decimal::new(1198, 2));
        assert_eq!(totals.shipping.amount(), Decimal::new(399, 2));
        assert_eq!(totals.tax.amount(), Decimal::new(9584, 4));
        assert_eq!(totals.total.amount(), Decimal::new(169284, 4));
        assert_eq!(totals.total.to_string(), "$16.93");
    }

    #[test]
    fn test_zero_subtotal_is_shipping_only() {
        let totals = PricingPolicy::default().price(Money::zero());
        assert!(totals.tax.is_zero());
        assert_eq!(totals.total, Money::from_minor(399));
    }

    #[test]
    fn test_total_non_decreasing_in_quantity() {
        let policy = PricingPolicy::default();
        let unit = Money::from_minor(450);
        let mut last = policy.price(Money::zero()).total;
        for qty in 1..=20 {
            let total = policy.price(unit.multiply_quantity(qty)).total;
            assert!(total >= last);
            last = total;
        }
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy::new(Money::zero(), TaxRate::from_bps(1000));
        let totals = policy.price(Money::from_minor(1000));
        assert_eq!(totals.tax, Money::from_minor(100));
        assert_eq!(totals.total, Money::from_minor(1100));
    }
}
