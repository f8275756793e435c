//! Cart route handlers.
//!
//! Each mutation handler performs one lock-acquire / read-modify-persist /
//! release cycle on the cart store and returns the refreshed cart view,
//! tagged with the notice the client turns into a toast. Stock and
//! lookup failures surface through [`AppError`] with the matching notice
//! in the error body.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tienda_core::{Cart, CartNotice, ProductId};
use tracing::instrument;

use crate::cart::QuantityChange;
use crate::error::Result;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// Formatted unit price (e.g., "$79.99").
    pub price: String,
    /// Formatted line total.
    pub line_total: String,
    pub image: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    /// Formatted subtotal.
    pub subtotal: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    quantity: line.quantity,
                    price: line.price.display(),
                    line_total: line.line_total().display(),
                    image: line.image.to_string(),
                })
                .collect(),
            item_count: cart.total_quantity(),
            subtotal: cart.subtotal().display(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    /// Signed change to the line's quantity.
    pub delta: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Cart mutation response: refreshed view plus the toast notice, when the
/// outcome warrants one (in-place quantity updates carry none).
#[derive(Debug, Serialize)]
pub struct CartMutationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<CartNotice>,
    pub cart: CartView,
}

/// Cart count badge response.
#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub count: u32,
}

/// Current cart view.
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let store = state.cart();
    Json(CartView::from(store.cart()))
}

/// Add one unit of a product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartMutationResponse>> {
    let mut store = state.cart();
    store.add(state.catalog(), request.product_id)?;
    Ok(Json(CartMutationResponse {
        notice: Some(CartNotice::Added),
        cart: CartView::from(store.cart()),
    }))
}

/// Change a line's quantity by a signed delta.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartMutationResponse>> {
    let mut store = state.cart();
    let change = store.set_quantity(state.catalog(), request.product_id, request.delta)?;
    let notice = match change {
        QuantityChange::Removed => Some(CartNotice::Removed),
        QuantityChange::Updated { .. } => None,
    };
    Ok(Json(CartMutationResponse {
        notice,
        cart: CartView::from(store.cart()),
    }))
}

/// Remove a product's line from the cart (idempotent).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartMutationResponse>> {
    let mut store = state.cart();
    let removed = store.remove(request.product_id)?;
    Ok(Json(CartMutationResponse {
        notice: removed.then_some(CartNotice::Removed),
        cart: CartView::from(store.cart()),
    }))
}

/// Cart count badge value.
pub async fn count(State(state): State<AppState>) -> Json<CartCountResponse> {
    let store = state.cart();
    Json(CartCountResponse {
        count: store.total_quantity(),
    })
}
