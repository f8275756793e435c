//! Outcome vocabulary for cart operations.

use serde::{Deserialize, Serialize};

/// The one-word outcome a cart mutation hands to the presentation layer.
///
/// The storefront maps each value to a user-visible toast and decides which
/// HTTP status accompanies it; this crate only defines the vocabulary.
/// In-place quantity updates carry no notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartNotice {
    /// A product was added to the cart.
    Added,
    /// A line was removed from the cart.
    Removed,
    /// The requested quantity would exceed the product's stock.
    InsufficientStock,
    /// The product does not exist or has zero stock.
    ProductUnavailable,
    /// The targeted product has no line in the cart.
    ItemNotFound,
}
