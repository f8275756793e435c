//! Product record served by the catalog.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{Price, ProductId};

/// A catalog product.
///
/// Products are loaded once at startup and immutable for the life of the
/// process. `stock` is the purchase ceiling the cart enforces per product;
/// there is no server-side inventory mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Units available; a product with zero stock cannot be added to a cart.
    pub stock: u32,
    pub category: String,
    pub image: Url,
    /// Shown on the home page when set.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::CurrencyCode;

    #[test]
    fn test_featured_defaults_to_false() {
        let json = r#"{
            "id": 5,
            "name": "Monitor",
            "price": {"amount": "199.99", "currency_code": "USD"},
            "stock": 3,
            "category": "Technology",
            "image": "https://example.com/monitor.jpg"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(!product.featured);
        assert_eq!(product.price.amount, Decimal::new(19999, 2));
        assert_eq!(product.price.currency_code, CurrencyCode::USD);
    }

    #[test]
    fn test_in_stock() {
        let mut product: Product = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Laptop",
                "price": {"amount": "999.99", "currency_code": "USD"},
                "stock": 5,
                "category": "Technology",
                "image": "https://example.com/laptop.jpg",
                "featured": true
            }"#,
        )
        .unwrap();
        assert!(product.in_stock());
        product.stock = 0;
        assert!(!product.in_stock());
    }
}
