//! Product catalog: read-only lookup and filtering.
//!
//! The catalog is loaded once at startup - either from a JSON file named by
//! `STOREFRONT_CATALOG_PATH` or from the built-in seed - and never mutated.
//! It backs the product routes (listing, category filter, featured row) and
//! gives the cart store its per-product stock ceilings.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tienda_core::{Product, ProductId};

/// Built-in demo catalog used when no catalog file is configured.
const SEED_JSON: &str = r#"[
  {
    "id": 1,
    "name": "Gaming Laptop",
    "price": {"amount": "999.99", "currency_code": "USD"},
    "stock": 5,
    "category": "Technology",
    "image": "https://images.unsplash.com/photo-1603302576837-37561b2e2302?auto=format&fit=crop&w=1168&q=80",
    "featured": true
  },
  {
    "id": 2,
    "name": "Smartphone",
    "price": {"amount": "499.99", "currency_code": "USD"},
    "stock": 10,
    "category": "Technology",
    "image": "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?auto=format&fit=crop&w=880&q=80",
    "featured": true
  },
  {
    "id": 3,
    "name": "Wireless Headphones",
    "price": {"amount": "79.99", "currency_code": "USD"},
    "stock": 15,
    "category": "Audio",
    "image": "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?auto=format&fit=crop&w=1170&q=80",
    "featured": false
  },
  {
    "id": 4,
    "name": "Tablet",
    "price": {"amount": "299.99", "currency_code": "USD"},
    "stock": 8,
    "category": "Technology",
    "image": "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?auto=format&fit=crop&w=1170&q=80",
    "featured": true
  }
]"#;

/// Errors loading a catalog file.
///
/// Unlike cart rehydration, a bad catalog is a startup error: the catalog
/// is configuration, not recoverable state.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only product collection.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Build a catalog from a product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a catalog from a JSON file (an array of products).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        Ok(Self::new(products))
    }

    /// The built-in demo catalog.
    #[must_use]
    pub fn seed() -> Self {
        // Embedded data, covered by tests
        let products =
            serde_json::from_str(SEED_JSON).expect("built-in seed catalog must be valid");
        Self::new(products)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products flagged for the home page.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Distinct categories in first-seen order (for the filter control).
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Filter by case-insensitive name substring and/or exact category.
    ///
    /// `None` for either argument means "no constraint"; both `None`
    /// returns the full catalog.
    #[must_use]
    pub fn filter(&self, search: Option<&str>, category: Option<&str>) -> Vec<&Product> {
        let search = search.map(str::to_lowercase);
        self.products
            .iter()
            .filter(|product| {
                let matches_search = search
                    .as_deref()
                    .is_none_or(|term| product.name.to_lowercase().contains(term));
                let matches_category = category.is_none_or(|c| product.category == c);
                matches_search && matches_category
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
