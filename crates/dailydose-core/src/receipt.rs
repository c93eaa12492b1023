//! # Receipt
//!
//! The confirmation shown after a successful checkout.
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Thank You For Your Order!               │
//! │  Order Number: BB-48213                  │
//! │  Estimated Ready Time: 02:15 PM - 02:30 PM│
//! │  ────────────────────────────────────    │
//! │  2 × Classic Milk Tea           $11.98   │
//! │  Subtotal / Shipping / Tax / Total       │
//! │  ────────────────────────────────────    │
//! │  Customer: name, email, phone, address,  │
//! │            payment method label          │
//! └──────────────────────────────────────────┘
//! ```
//!
//! The order number is a display token. It is generated here and never
//! written to the database.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone};
use rand::Rng;
use serde::Serialize;

use crate::cart::CartItem;
use crate::codes::generate_display_number;
use crate::money::Money;
use crate::pricing::PriceBreakdown;
use crate::types::CustomerDetails;

/// Minutes from now until the order is earliest ready.
pub const READY_FROM_MINUTES: i64 = 15;
/// Minutes from now until the order is latest ready.
pub const READY_UNTIL_MINUTES: i64 = 30;

const TIME_FORMAT: &str = "%I:%M %p";

/// One receipt line: `quantity × name`, line total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub quantity: i64,
    pub name: String,
    pub line_total: Money,
}

/// Estimated ready window, formatted as local `hh:mm AM/PM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadyWindow {
    pub from: String,
    pub until: String,
}

impl fmt::Display for ReadyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.from, self.until)
    }
}

/// A rendered order confirmation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub order_number: String,
    pub ready: ReadyWindow,
    pub lines: Vec<ReceiptLine>,
    pub totals: PriceBreakdown,
    pub customer: CustomerDetails,
    pub payment_label: String,
}

impl Receipt {
    /// Builds the receipt for `lines`, stamped relative to `now`.
    ///
    /// `now` carries the customer's time zone; the window is formatted in it.
    pub fn compose<Tz, R>(
        lines: &[CartItem],
        totals: PriceBreakdown,
        customer: &CustomerDetails,
        now: DateTime<Tz>,
        rng: &mut R,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
        R: Rng + ?Sized,
    {
        let from = now.clone() + Duration::minutes(READY_FROM_MINUTES);
        let until = now + Duration::minutes(READY_UNTIL_MINUTES);

        Receipt {
            order_number: generate_display_number(rng),
            ready: ReadyWindow {
                from: from.format(TIME_FORMAT).to_string(),
                until: until.format(TIME_FORMAT).to_string(),
            },
            lines: lines
                .iter()
                .map(|item| ReceiptLine {
                    quantity: item.quantity,
                    name: item.name.clone(),
                    line_total: item.line_total(),
                })
                .collect(),
            totals,
            customer: customer.clone(),
            payment_label: customer.payment_method.label().to_string(),
        }
    }
}

/// Plain-text rendering. Money is shown with two decimals.
impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Thank You For Your Order!")?;
        writeln!(f, "Order Number: {}", self.order_number)?;
        writeln!(f, "Estimated Ready Time: {}", self.ready)?;
        writeln!(f)?;
        writeln!(f, "Order Summary")?;
        for line in &self.lines {
            writeln!(f, "  {} × {}  {}", line.quantity, line.name, line.line_total)?;
        }
        writeln!(f, "  Subtotal  {}", self.totals.subtotal)?;
        writeln!(f, "  Shipping  {}", self.totals.shipping)?;
        writeln!(f, "  Tax       {}", self.totals.tax)?;
        writeln!(f, "  Total     {}", self.totals.total)?;
        writeln!(f)?;
        writeln!(f, "Customer Information")?;
        writeln!(f, "  Name: {}", self.customer.name)?;
        writeln!(f, "  Email: {}", self.customer.email)?;
        writeln!(f, "  Phone: {}", self.customer.phone)?;
        writeln!(f, "  Address: {}", self.customer.address)?;
        write!(f, "  Payment Method: {}", self.payment_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingPolicy;
    use crate::types::PaymentMethod;
    use chrono::{FixedOffset, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lines() -> Vec<CartItem> {
        vec![CartItem {
            id: 1,
            name: "Classic Milk Tea".to_string(),
            price: Money::from_minor(599),
            image: String::new(),
            quantity: 2,
        }]
    }

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Ana Cruz".to_string(),
            email: "ana@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Tea St".to_string(),
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn test_ready_window_is_15_to_30_minutes() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 13, 50, 0).unwrap();
        let totals = PricingPolicy::default().price(Money::from_minor(1198));
        let receipt = Receipt::compose(
            &lines(),
            totals,
            &customer(),
            now,
            &mut StdRng::seed_from_u64(1),
        );

        assert_eq!(receipt.ready.from, "02:05 PM");
        assert_eq!(receipt.ready.until, "02:20 PM");
        assert_eq!(receipt.ready.to_string(), "02:05 PM - 02:20 PM");
    }

    #[test]
    fn test_window_uses_local_offset() {
        let manila = FixedOffset::east_opt(8 * 3600).unwrap();
        let now = manila.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let totals = PricingPolicy::default().price(Money::zero());
        let receipt = Receipt::compose(&[], totals, &customer(), now, &mut StdRng::seed_from_u64(1));

        assert_eq!(receipt.ready.from, "09:15 AM");
        assert_eq!(receipt.ready.until, "09:30 AM");
    }

    #[test]
    fn test_receipt_lines_and_text() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let totals = PricingPolicy::default().price(Money::from_minor(1198));
        let receipt = Receipt::compose(
            &lines(),
            totals,
            &customer(),
            now,
            &mut StdRng::seed_from_u64(9),
        );

        assert!(receipt.order_number.starts_with("BB-"));
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].line_total, Money::from_minor(1198));
        assert_eq!(receipt.payment_label, "Cash on Delivery");

        let text = receipt.to_string();
        assert!(text.contains("2 × Classic Milk Tea  $11.98"));
        assert!(text.contains("Tax       $0.96"));
        assert!(text.contains("Total     $16.93"));
        assert!(text.contains("Payment Method: Cash on Delivery"));
    }
}
