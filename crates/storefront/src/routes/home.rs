//! Home page handler.

use axum::{Json, extract::State};

use super::products::ProductView;
use crate::state::AppState;

/// Featured products for the home page.
pub async fn home(State(state): State<AppState>) -> Json<Vec<ProductView>> {
    let featured = state
        .catalog()
        .featured()
        .into_iter()
        .map(ProductView::from)
        .collect();
    Json(featured)
}
