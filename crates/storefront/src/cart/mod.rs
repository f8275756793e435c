//! The cart state manager.
//!
//! [`CartStore`] owns the session's cart: it enforces per-product stock
//! ceilings against the catalog, persists the serialized cart to the blob
//! store on every successful mutation, and rehydrates from it at startup.
//! Every operation is a single read-modify-persist step; on any failure the
//! in-memory cart is left untouched.

mod store;

use thiserror::Error;
use tienda_core::{CartNotice, ProductId};

use crate::storage::StorageError;

pub use store::{CartStore, QuantityChange};

/// Fixed persistence key for the serialized cart.
pub const CART_KEY: &str = "cart";

/// Errors from cart mutations.
///
/// All variants are recoverable and leave the cart unchanged; the first
/// three are expected outcomes the UI turns into toasts, while `Storage`
/// means persistence itself failed.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product does not exist or has zero stock.
    #[error("product {0} is not available")]
    ProductUnavailable(ProductId),

    /// The requested quantity would exceed the product's stock.
    #[error("not enough stock for product {0}")]
    InsufficientStock(ProductId),

    /// The targeted product has no line in the cart.
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// Persisting the mutated cart failed; the mutation was rolled back.
    #[error("cart persistence failed: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// The notice the UI layer shows for this error, if it is a user-facing
    /// outcome rather than a server-side failure.
    #[must_use]
    pub const fn notice(&self) -> Option<CartNotice> {
        match self {
            Self::ProductUnavailable(_) => Some(CartNotice::ProductUnavailable),
            Self::InsufficientStock(_) => Some(CartNotice::InsufficientStock),
            Self::ItemNotFound(_) => Some(CartNotice::ItemNotFound),
            Self::Storage(_) => None,
        }
    }
}
