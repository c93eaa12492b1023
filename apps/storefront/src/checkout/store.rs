//! The persistence calls the checkout sequence makes.
//!
//! Kept behind a trait so placement can be driven against a fake that fails
//! on demand.

use async_trait::async_trait;

use dailydose_core::{NewOrder, NewOrderItem, Order, ProductId};
use dailydose_db::{Database, DbResult};

/// Remote writes performed while placing an order.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts the order row.
    async fn insert_order(&self, order: &NewOrder) -> DbResult<Order>;

    /// Reads the current stock of a product.
    async fn fetch_stock(&self, item_id: ProductId) -> DbResult<i64>;

    /// Overwrites the stock of a product.
    async fn write_stock(&self, item_id: ProductId, stock: i64) -> DbResult<()>;

    /// Inserts every order line in one batch.
    async fn insert_order_items(&self, items: &[NewOrderItem]) -> DbResult<u64>;
}

#[async_trait]
impl OrderStore for Database {
    async fn insert_order(&self, order: &NewOrder) -> DbResult<Order> {
        self.orders().insert(order).await
    }

    async fn fetch_stock(&self, item_id: ProductId) -> DbResult<i64> {
        self.products().get_stock(item_id).await
    }

    async fn write_stock(&self, item_id: ProductId, stock: i64) -> DbResult<()> {
        self.products().set_stock(item_id, stock).await
    }

    async fn insert_order_items(&self, items: &[NewOrderItem]) -> DbResult<u64> {
        self.orders().insert_items(items).await
    }
}
