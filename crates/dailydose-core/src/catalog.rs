//! # Catalog
//!
//! Menu search and the inventory summary shown on the admin stocks screen.
//! Both operate on product snapshots already loaded from the database.

use serde::Serialize;

use crate::types::{Category, Product};

/// How many products the "recently added" panel shows.
pub const RECENT_ITEMS: usize = 5;

/// Filters the menu.
///
/// ## Rules
/// - `query` matches a case-insensitive substring of name OR description
/// - a blank query matches everything
/// - `category` narrows to one menu section
///
/// Input order is kept.
pub fn search<'a>(
    products: &'a [Product],
    query: &str,
    category: Option<Category>,
) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();

    products
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Totals for the admin inventory page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    /// Σ stock over all products (negative stock counts as-is), saturating
    /// at the `i64` bounds.
    pub total_stock: i64,
    pub product_count: usize,
    /// The first [`RECENT_ITEMS`] products of a newest-first listing.
    pub recent: Vec<Product>,
}

impl InventorySummary {
    /// Builds the summary from a newest-first product listing.
    pub fn from_newest_first(products: &[Product]) -> Self {
        InventorySummary {
            total_stock: products
                .iter()
                .fold(0i64, |total, p| total.saturating_add(p.stock)),
            product_count: products.len(),
            recent: products.iter().take(RECENT_ITEMS).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Utc;

    fn product(id: i64, name: &str, description: &str, category: Category, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price: Money::from_minor(500),
            image: String::new(),
            stock,
            category,
            created_at: Utc::now(),
        }
    }

    fn menu() -> Vec<Product> {
        vec![
            product(1, "Classic Milk Tea", "Black tea with milk", Category::Classic, 30),
            product(2, "Mango Green Tea", "Fresh mango and jasmine", Category::Fruit, 4),
            product(3, "Brown Sugar Boba", "Tiger stripes with milk", Category::Specialty, 0),
            product(4, "Iced Latte", "Espresso over milk", Category::Coffee, 12),
            product(5, "Passion Fruit Tea", "Tart and bright", Category::Fruit, 9),
            product(6, "Taro Milk Tea", "Purple yam", Category::Classic, -2),
        ]
    }

    #[test]
    fn test_search_name_and_description() {
        let menu = menu();
        let ids: Vec<i64> = search(&menu, "MILK", None).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 6]);

        let ids: Vec<i64> = search(&menu, "mango", None).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_search_blank_query_returns_all() {
        let menu = menu();
        assert_eq!(search(&menu, "   ", None).len(), menu.len());
    }

    #[test]
    fn test_search_by_category() {
        let menu = menu();
        let ids: Vec<i64> = search(&menu, "", Some(Category::Fruit))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2, 5]);

        assert!(search(&menu, "latte", Some(Category::Classic)).is_empty());
    }

    #[test]
    fn test_inventory_summary() {
        let menu = menu();
        let summary = InventorySummary::from_newest_first(&menu);

        assert_eq!(summary.total_stock, 53);
        assert_eq!(summary.product_count, 6);
        assert_eq!(summary.recent.len(), RECENT_ITEMS);
        assert_eq!(summary.recent[0].id, 1);
    }

    #[test]
    fn test_inventory_summary_empty() {
        let summary = InventorySummary::from_newest_first(&[]);
        assert_eq!(summary.total_stock, 0);
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn test_inventory_summary_saturates() {
        let rows = [
            product(1, "Taro", "", Category::Classic, i64::MAX),
            product(2, "Matcha", "", Category::Specialty, i64::MAX),
        ];
        let summary = InventorySummary::from_newest_first(&rows);
        assert_eq!(summary.total_stock, i64::MAX);
    }
}
