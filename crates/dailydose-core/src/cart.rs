//! # Cart
//!
//! The customer's shopping cart: an ordered list of line items.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Menu Action              Cart Method             Effect                │
//! │  ───────────              ───────────             ──────                │
//! │                                                                         │
//! │  "Add to cart" ──────────► add(&product) ───────► qty + 1 or push       │
//! │                                                                         │
//! │  +/- buttons ────────────► update_quantity() ───► set, or remove at 0   │
//! │                                                                         │
//! │  Trash icon ─────────────► remove(id) ──────────► retain != id          │
//! │                                                                         │
//! │  Finish order ───────────► clear() ─────────────► items.clear()         │
//! │                                                                         │
//! │  Header / checkout ──────► subtotal() ──────────► Σ price × qty         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never checks stock; the menu disables the button for sold-out
//! items and oversold orders are accepted by checkout.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::{validate_quantity, ValidationResult};

/// A line in the cart.
///
/// Name, price and image are copied from the product when the line is
/// created and stay fixed while the line lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product id, unique within the cart.
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
    /// 1..=[`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY) while the line is present.
    pub quantity: i64,
}

impl CartItem {
    fn from_product(product: &Product) -> Self {
        CartItem {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product bumps quantity)
/// - Every present item has quantity in 1..=`MAX_ITEM_QUANTITY`
/// - Insertion order is kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Returns
    /// - `Err(OutOfRange)` if the line is already at `MAX_ITEM_QUANTITY`;
    ///   the cart is left unchanged
    pub fn add(&mut self, product: &Product) -> ValidationResult<()> {
        match self.items.iter_mut().find(|i| i.id == product.id) {
            Some(item) => {
                let quantity = item.quantity + 1;
                validate_quantity(quantity)?;
                item.quantity = quantity;
            }
            None => self.items.push(CartItem::from_product(product)),
        }
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line
    /// - `quantity > MAX_ITEM_QUANTITY`: `Err(OutOfRange)`, cart unchanged
    /// - id not in cart: no-op
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> ValidationResult<()> {
        if quantity <= 0 {
            self.remove(id);
            return Ok(());
        }

        validate_quantity(quantity)?;
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    /// Removes a line. Absent ids are ignored.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|i| i.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Σ(price × quantity), computed on every call.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total units across lines (the header badge).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::Category;
    use crate::MAX_ITEM_QUANTITY;
    use chrono::Utc;

    fn test_product(id: i64, cents: i64) -> Product {
        Product {
            id,
            name: format!("Drink {}", id),
            description: String::new(),
            price: Money::from_minor(cents),
            image: format!("https://img.example/{}.png", id),
            stock: 20,
            category: Category::Classic,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_new_and_existing() {
        let mut cart = Cart::new();
        let tea = test_product(1, 599);

        cart.add(&tea).unwrap();
        cart.add(&tea).unwrap();
        cart.add(&test_product(2, 450)).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.get(1).map(|i| i.quantity), Some(2));
        assert_eq!(cart.items()[1].id, 2);
    }

    #[test]
    fn test_subtotal_is_sum_of_lines() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(), Money::zero());

        cart.add(&test_product(1, 599)).unwrap();
        cart.update_quantity(1, 2).unwrap();
        cart.add(&test_product(2, 450)).unwrap();

        assert_eq!(cart.subtotal(), Money::from_minor(1648));
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 599)).unwrap();

        cart.update_quantity(1, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 599)).unwrap();

        cart.update_quantity(1, -1).unwrap();
        assert!(cart.get(1).is_none());
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 599)).unwrap();
        let before = cart.clone();

        cart.update_quantity(42, 5).unwrap();
        cart.remove(42);

        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 599)).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_line_keeps_price_at_time_of_add() {
        let mut cart = Cart::new();
        let mut tea = test_product(1, 599);
        cart.add(&tea).unwrap();

        tea.price = Money::from_minor(999);
        cart.add(&tea).unwrap();

        assert_eq!(cart.get(1).map(|i| i.price), Some(Money::from_minor(599)));
    }

    #[test]
    fn test_update_quantity_above_max_is_refused() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 599)).unwrap();

        let err = cart.update_quantity(1, i64::MAX).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange { max: MAX_ITEM_QUANTITY, .. }
        ));
        assert_eq!(cart.get(1).map(|i| i.quantity), Some(1));

        cart.update_quantity(1, MAX_ITEM_QUANTITY).unwrap();
        assert_eq!(cart.total_quantity(), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_add_stops_at_max_quantity() {
        let mut cart = Cart::new();
        let tea = test_product(1, 599);
        cart.add(&tea).unwrap();
        cart.update_quantity(1, MAX_ITEM_QUANTITY).unwrap();

        assert!(cart.add(&tea).is_err());
        assert_eq!(cart.get(1).map(|i| i.quantity), Some(MAX_ITEM_QUANTITY));
        assert_eq!(
            cart.subtotal(),
            Money::from_minor(599).multiply_quantity(MAX_ITEM_QUANTITY)
        );
    }
}
