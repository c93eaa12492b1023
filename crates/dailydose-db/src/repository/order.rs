//! # Order Repository
//!
//! Database operations for orders and order lines.
//!
//! ## Checkout Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. insert(NewOrder)            → Order { id, status: Pending }         │
//! │  2. (stock stage, items table)                                          │
//! │  3. insert_items(&[NewOrderItem]) → one batch, all rows or none         │
//! │                                                                         │
//! │  Steps 1-3 are separate writes. A failure in 3 leaves 1 and 2 in place. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

use crate::error::{DbError, DbResult};
use dailydose_core::{Money, NewOrder, NewOrderItem, Order, OrderId, OrderItem, OrderStatus};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    order_code: String,
    user_name: String,
    status: OrderStatus,
    total_price: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            order_code: row.order_code,
            user_name: row.user_name,
            status: row.status,
            total_price: Money::from_str(&row.total_price)
                .map_err(|e| DbError::decode("orders.total_price", e))?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    item_id: i64,
    item_name: String,
    quantity: i64,
    unit_price: String,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = DbError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        Ok(OrderItem {
            id: row.id,
            order_id: row.order_id,
            item_id: row.item_id,
            item_name: row.item_name,
            quantity: row.quantity,
            unit_price: Money::from_str(&row.unit_price)
                .map_err(|e| DbError::decode("order_items.unit_price", e))?,
        })
    }
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order row.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - order code already used
    pub async fn insert(&self, order: &NewOrder) -> DbResult<Order> {
        debug!(order_code = %order.order_code, total = %order.total_price, "Inserting order");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO orders (order_code, user_name, status, total_price, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&order.order_code)
        .bind(&order.user_name)
        .bind(order.status)
        .bind(order.total_price.amount().to_string())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Order {
            id: result.last_insert_rowid(),
            order_code: order.order_code.clone(),
            user_name: order.user_name.clone(),
            status: order.status,
            total_price: order.total_price,
            created_at: now,
        })
    }

    /// Inserts order lines as one batch.
    ///
    /// The batch runs in a transaction: either every line is written or
    /// none is.
    pub async fn insert_items(&self, items: &[NewOrderItem]) -> DbResult<u64> {
        debug!(count = items.len(), "Inserting order items");

        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for item in items {
            let result = sqlx::query(
                r#"
                INSERT INTO order_items (order_id, item_id, item_name, quantity, unit_price)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(item.order_id)
            .bind(item.item_id)
            .bind(&item.item_name)
            .bind(item.quantity)
            .bind(item.unit_price.amount().to_string())
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, id: OrderId) -> DbResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, order_code, user_name, status, total_price, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Lists every order, newest first.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, order_code, user_name, status, total_price, created_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Gets the lines of an order in insertion order.
    pub async fn items_for(&self, order_id: OrderId) -> DbResult<Vec<OrderItem>> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            r#"
            SELECT id, order_id, item_id, item_name, quantity, unit_price
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderItem::try_from).collect()
    }

    /// Counts orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn new_order(code: &str) -> NewOrder {
        NewOrder {
            order_code: code.to_string(),
            user_name: "Ana Cruz".to_string(),
            status: OrderStatus::Pending,
            total_price: Money::from_str("16.9284").unwrap(),
        }
    }

    async fn repo() -> OrderRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().orders()
    }

    #[tokio::test]
    async fn test_insert_keeps_full_precision_total() {
        let repo = repo().await;
        let order = repo.insert(&new_order("ORD-1-1")).await.unwrap();

        let fetched = repo.get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(fetched.order_code, "ORD-1-1");
        assert_eq!(fetched.status, OrderStatus::Pending);
        assert_eq!(fetched.total_price, Money::from_str("16.9284").unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_order_code() {
        let repo = repo().await;
        repo.insert(&new_order("ORD-1-1")).await.unwrap();

        let err = repo.insert(&new_order("ORD-1-1")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_insert_items_batch() {
        let repo = repo().await;
        let order = repo.insert(&new_order("ORD-2-5")).await.unwrap();

        let lines = vec![
            NewOrderItem {
                order_id: order.id,
                item_id: 1,
                item_name: "Classic Milk Tea".to_string(),
                quantity: 2,
                unit_price: Money::from_minor(599),
            },
            NewOrderItem {
                order_id: order.id,
                item_id: 4,
                item_name: "Iced Latte".to_string(),
                quantity: 1,
                unit_price: Money::from_minor(450),
            },
        ];
        assert_eq!(repo.insert_items(&lines).await.unwrap(), 2);

        let items = repo.items_for(order.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_name, "Classic Milk Tea");
        assert_eq!(items[0].line_total(), Money::from_minor(1198));
    }

    #[tokio::test]
    async fn test_insert_items_is_all_or_nothing() {
        let repo = repo().await;
        let order = repo.insert(&new_order("ORD-3-0")).await.unwrap();

        let lines = vec![
            NewOrderItem {
                order_id: order.id,
                item_id: 1,
                item_name: "Ok".to_string(),
                quantity: 1,
                unit_price: Money::from_minor(100),
            },
            NewOrderItem {
                order_id: 9999,
                item_id: 1,
                item_name: "Orphan".to_string(),
                quantity: 1,
                unit_price: Money::from_minor(100),
            },
        ];

        let err = repo.insert_items(&lines).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(repo.items_for(order.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = repo().await;
        let a = repo.insert(&new_order("ORD-A")).await.unwrap();
        let b = repo.insert(&new_order("ORD-B")).await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
