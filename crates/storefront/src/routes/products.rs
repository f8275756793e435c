//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tienda_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    /// Formatted price (e.g., "$999.99").
    pub price: String,
    pub category: String,
    pub image: String,
    pub stock: u32,
    pub in_stock: bool,
    pub featured: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.display(),
            category: product.category.clone(),
            image: product.image.to_string(),
            stock: product.stock,
            in_stock: product.in_stock(),
            featured: product.featured,
        }
    }
}

/// Listing filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductFilterQuery {
    /// Case-insensitive name substring.
    pub q: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
}

/// List products, optionally filtered by search term and category.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductFilterQuery>,
) -> Json<Vec<ProductView>> {
    let products = state
        .catalog()
        .filter(query.q.as_deref(), query.category.as_deref())
        .into_iter()
        .map(ProductView::from)
        .collect();
    Json(products)
}

/// Distinct category list for the filter control.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    let categories = state
        .catalog()
        .categories()
        .into_iter()
        .map(String::from)
        .collect();
    Json(categories)
}

/// Product detail by id.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductView>> {
    let id = ProductId::new(id);
    state
        .catalog()
        .find_by_id(id)
        .map(|product| Json(ProductView::from(product)))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
