//! Cart line items and the pure cart collection.
//!
//! [`Cart`] is the in-memory shape of a shopping cart: an insertion-ordered
//! sequence of lines, one per distinct product. It carries no I/O - stock
//! enforcement and persistence live in the storefront crate's cart store,
//! which owns a `Cart` and mutates it through these operations.
//!
//! The serialized form (`#[serde(transparent)]`, a JSON array of lines) is
//! exactly what the store persists, so serialize/deserialize round-trips
//! are lossless for every reachable cart.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{CurrencyCode, Price, ProductId};

/// One row of a cart: a product and its requested quantity.
///
/// Name, price, and image are captured from the catalog at add time so the
/// cart can be rendered without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    /// Always at least 1; a line whose quantity would drop to zero is
    /// removed instead.
    pub quantity: u32,
    pub image: Url,
}

impl CartLine {
    /// The line total (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// An insertion-ordered cart: first-added product first.
///
/// Uniqueness invariant: no two lines share a `product_id`. The mutating
/// operations preserve it; `push` is only called for ids absent from the
/// cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from already-validated lines.
    ///
    /// Callers are responsible for the one-line-per-product invariant;
    /// this is used when rehydrating a sanitized line list.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Consume the cart, yielding its lines in insertion order.
    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Append a line for a product not yet in the cart.
    pub fn push(&mut self, line: CartLine) {
        debug_assert!(self.line(line.product_id).is_none());
        self.lines.push(line);
    }

    /// Set the quantity of an existing line. Returns `false` if the product
    /// has no line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line for `product_id`. Returns whether a line was removed;
    /// removing an absent product leaves the cart unchanged.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    /// Total number of items across all lines (the cart badge value).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Price::zero(CurrencyCode::default()), |acc, line| {
                acc.plus(&line)
            })
    }
}
