//! Public menu.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dailydose_core::catalog::search;
use dailydose_core::{Category, CoreError, Product, StockStatus};

use crate::error::ApiError;
use crate::AppState;

/// `?q=&category=`. A blank or `all` category means every section.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
}

impl MenuQuery {
    fn category(&self) -> Result<Option<Category>, CoreError> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) if raw.eq_ignore_ascii_case("all") => Ok(None),
            Some(raw) => Ok(Some(raw.parse::<Category>()?)),
        }
    }
}

/// A product as shown on the menu page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    #[serde(flatten)]
    pub product: Product,
    pub stock_status: StockStatus,
    /// "In Stock", "Only 3 left", "Out of Stock"
    pub stock_label: String,
    pub available: bool,
}

impl From<&Product> for MenuEntry {
    fn from(product: &Product) -> Self {
        let status = product.stock_status();
        MenuEntry {
            product: product.clone(),
            stock_status: status,
            stock_label: status.to_string(),
            available: product.is_available(),
        }
    }
}

/// Lists the menu, newest first, filtered by search text and category.
pub async fn list_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<Json<Vec<MenuEntry>>, ApiError> {
    let category = query.category()?;
    let products = state.db.products().list().await?;

    let entries: Vec<MenuEntry> = search(&products, &query.q, category)
        .into_iter()
        .map(MenuEntry::from)
        .collect();

    debug!(q = %query.q, ?category, matches = entries.len(), "Menu search");
    Ok(Json(entries))
}
