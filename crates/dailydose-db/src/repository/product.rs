//! # Product Repository
//!
//! Database operations for menu items (`items` table).
//!
//! ## Key Operations
//! - Newest-first listing for the menu and the admin inventory
//! - Admin CRUD
//! - Raw stock read/write used by the checkout stock stage
//!
//! ## Stock Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout decrements stock as read-then-write:                          │
//! │                                                                         │
//! │     stock = get_stock(id)              SELECT stock FROM items          │
//! │     set_stock(id, stock - qty)         UPDATE items SET stock = ?       │
//! │                                                                         │
//! │  Two checkouts racing on the same item can both read the same value.    │
//! │  No floor is applied; stock may go negative.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

use crate::error::{DbError, DbResult};
use dailydose_core::{Category, Money, Product, ProductDraft, ProductId};

const SELECT_ITEMS: &str = r#"
    SELECT id, name, description, price, image, stock, category, created_at
    FROM items
"#;

/// Row shape of the `items` table. Prices are stored as decimal text.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: String,
    image: String,
    stock: i64,
    category: Category,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Money::from_str(&row.price).map_err(|e| DbError::decode("items.price", e))?;
        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price,
            image: row.image,
            stock: row.stock,
            category: row.category,
            created_at: row.created_at,
        })
    }
}

/// Repository for menu item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let menu = repo.list().await?;
/// let tea = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every item, newest first.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{SELECT_ITEMS} ORDER BY created_at DESC, id DESC");
        let rows: Vec<ProductRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Listed items");
        rows.into_iter().map(Product::try_from).collect()
    }

    /// Gets an item by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let sql = format!("{SELECT_ITEMS} WHERE id = ?1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Inserts a new item. A draft without an image stores an empty URL.
    pub async fn insert(&self, draft: &ProductDraft) -> DbResult<Product> {
        debug!(name = %draft.name, category = %draft.category, "Inserting item");

        let now = Utc::now();
        let image = draft.image.clone().unwrap_or_default();

        let result = sqlx::query(
            r#"
            INSERT INTO items (name, description, price, image, stock, category, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price.amount().to_string())
        .bind(&image)
        .bind(draft.stock)
        .bind(draft.category)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            image,
            stock: draft.stock,
            category: draft.category,
            created_at: now,
        })
    }

    /// Updates an existing item.
    ///
    /// ## Behavior
    /// - `draft.image == None` keeps the stored image
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn update(&self, id: ProductId, draft: &ProductDraft) -> DbResult<Product> {
        debug!(id = %id, "Updating item");

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                description = ?3,
                price = ?4,
                stock = ?5,
                category = ?6,
                image = COALESCE(?7, image)
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price.amount().to_string())
        .bind(draft.stock)
        .bind(draft.category)
        .bind(draft.image.as_deref())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Deletes an item. Order history keeps its denormalized lines.
    pub async fn delete(&self, id: ProductId) -> DbResult<()> {
        debug!(id = %id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Reads the current stock of an item.
    pub async fn get_stock(&self, id: ProductId) -> DbResult<i64> {
        let stock: Option<i64> = sqlx::query_scalar("SELECT stock FROM items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        stock.ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Overwrites the stock of an item with an absolute value.
    pub async fn set_stock(&self, id: ProductId, stock: i64) -> DbResult<()> {
        debug!(id = %id, stock = %stock, "Writing stock");

        let result = sqlx::query("UPDATE items SET stock = ?2 WHERE id = ?1")
            .bind(id)
            .bind(stock)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Counts items (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn draft(name: &str, stock: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: format!("{} description", name),
            price: Money::from_minor(599),
            stock,
            category: Category::Fruit,
            image: Some(format!("https://cdn.example/{}.png", name)),
        }
    }

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let inserted = repo.insert(&draft("Lychee Tea", 12)).await.unwrap();

        let fetched = repo.get_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Lychee Tea");
        assert_eq!(fetched.price, Money::from_minor(599));
        assert_eq!(fetched.category, Category::Fruit);
        assert_eq!(fetched.stock, 12);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = repo().await;
        let first = repo.insert(&draft("First", 1)).await.unwrap();
        let second = repo.insert(&draft("Second", 1)).await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_keeps_image_when_absent() {
        let repo = repo().await;
        let inserted = repo.insert(&draft("Peach Tea", 5)).await.unwrap();

        let mut edit = draft("Peach Oolong", 8);
        edit.image = None;
        edit.price = Money::from_minor(650);
        let updated = repo.update(inserted.id, &edit).await.unwrap();

        assert_eq!(updated.name, "Peach Oolong");
        assert_eq!(updated.price, Money::from_minor(650));
        assert_eq!(updated.image, "https://cdn.example/Peach Tea.png");

        let err = repo.update(4242, &edit).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let inserted = repo.insert(&draft("Gone", 1)).await.unwrap();

        repo.delete(inserted.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(
            repo.delete(inserted.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_stock_read_and_write_allows_negative() {
        let repo = repo().await;
        let inserted = repo.insert(&draft("Matcha", 1)).await.unwrap();

        assert_eq!(repo.get_stock(inserted.id).await.unwrap(), 1);
        repo.set_stock(inserted.id, -2).await.unwrap();
        assert_eq!(repo.get_stock(inserted.id).await.unwrap(), -2);

        assert!(repo.get_stock(777).await.is_err());
        assert!(repo.set_stock(777, 3).await.is_err());
    }
}
