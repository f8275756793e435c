//! Cart store implementation.

use tienda_core::{Cart, CartLine, Price, ProductId};

use super::{CART_KEY, CartError};
use crate::catalog::ProductCatalog;
use crate::storage::{BlobStore, StorageError};

/// Outcome of a successful quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line's quantity was updated in place.
    Updated { quantity: u32 },
    /// The new quantity was zero or below, so the line was removed.
    Removed,
}

/// Owns the cart and its persistence.
///
/// Created once at startup via [`CartStore::open`] and shared through the
/// application state. Mutations clone the current cart, apply the change,
/// persist the candidate, and only then replace the in-memory cart - a
/// failed persist never leaves a half-applied state behind.
pub struct CartStore {
    cart: Cart,
    storage: Box<dyn BlobStore>,
}

impl CartStore {
    /// Open the store, rehydrating the persisted cart.
    ///
    /// Rehydration fails soft: a missing key, empty blob, or unparseable
    /// content resets to an empty cart (logged, never an error). Parsed
    /// lines are sanitized against the catalog - lines for unknown or
    /// out-of-stock products are dropped and quantities above stock are
    /// clamped - so the stock invariant holds from the first operation.
    #[must_use]
    pub fn open(storage: Box<dyn BlobStore>, catalog: &ProductCatalog) -> Self {
        let cart = rehydrate(storage.as_ref(), catalog);
        Self { cart, storage }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Total number of items across all lines (the badge value).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.cart.total_quantity()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.cart.subtotal()
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product that is unknown or out of stock is `ProductUnavailable`.
    /// An existing line is incremented while below the stock ceiling;
    /// otherwise the call fails with `InsufficientStock` and the cart is
    /// unchanged. A new line starts at quantity 1.
    ///
    /// Returns the new total item count.
    ///
    /// # Errors
    ///
    /// `ProductUnavailable`, `InsufficientStock`, or `Storage`.
    pub fn add(
        &mut self,
        catalog: &ProductCatalog,
        product_id: ProductId,
    ) -> Result<u32, CartError> {
        let product = catalog
            .find_by_id(product_id)
            .filter(|product| product.in_stock())
            .ok_or(CartError::ProductUnavailable(product_id))?;

        let mut candidate = self.cart.clone();
        match candidate.line(product_id) {
            Some(line) if line.quantity < product.stock => {
                let quantity = line.quantity + 1;
                candidate.set_quantity(product_id, quantity);
            }
            Some(_) => return Err(CartError::InsufficientStock(product_id)),
            None => candidate.push(CartLine {
                product_id,
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
                image: product.image.clone(),
            }),
        }

        self.commit(candidate)?;
        Ok(self.cart.total_quantity())
    }

    /// Change a line's quantity by a signed delta.
    ///
    /// A resulting quantity of zero or below removes the line (equivalent
    /// to [`Self::remove`]); one above the stock ceiling fails with
    /// `InsufficientStock` and changes nothing.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` if the product has no line, `ProductUnavailable` if
    /// it vanished from the catalog, `InsufficientStock`, or `Storage`.
    pub fn set_quantity(
        &mut self,
        catalog: &ProductCatalog,
        product_id: ProductId,
        delta: i64,
    ) -> Result<QuantityChange, CartError> {
        let line = self
            .cart
            .line(product_id)
            .ok_or(CartError::ItemNotFound(product_id))?;
        let new_quantity = i64::from(line.quantity) + delta;

        if new_quantity <= 0 {
            let mut candidate = self.cart.clone();
            candidate.remove(product_id);
            self.commit(candidate)?;
            return Ok(QuantityChange::Removed);
        }

        // The catalog is static, so the product is normally still present;
        // rehydration already dropped orphans.
        let product = catalog
            .find_by_id(product_id)
            .ok_or(CartError::ProductUnavailable(product_id))?;
        if new_quantity > i64::from(product.stock) {
            return Err(CartError::InsufficientStock(product_id));
        }

        // 0 < new_quantity <= stock, so the cast cannot fail
        let quantity = u32::try_from(new_quantity)
            .map_err(|_| CartError::InsufficientStock(product_id))?;
        let mut candidate = self.cart.clone();
        candidate.set_quantity(product_id, quantity);
        self.commit(candidate)?;
        Ok(QuantityChange::Updated { quantity })
    }

    /// Remove a product's line from the cart.
    ///
    /// Removal is idempotent: an absent product is a successful no-op, not
    /// an error. The cart is persisted afterward either way. Returns
    /// whether a line was actually removed.
    ///
    /// # Errors
    ///
    /// `Storage` only.
    pub fn remove(&mut self, product_id: ProductId) -> Result<bool, CartError> {
        let mut candidate = self.cart.clone();
        let removed = candidate.remove(product_id);
        self.commit(candidate)?;
        Ok(removed)
    }

    /// The serialized form of the current cart (what gets persisted).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if encoding fails.
    pub fn serialize(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.cart)?)
    }

    /// Whether the blob store is currently usable (readiness probe).
    #[must_use]
    pub fn storage_ready(&self) -> bool {
        self.storage.get(CART_KEY).is_ok()
    }

    /// Persist `candidate`, then make it the current cart. On failure the
    /// current cart is untouched.
    fn commit(&mut self, candidate: Cart) -> Result<(), CartError> {
        let blob = serde_json::to_string(&candidate).map_err(StorageError::from)?;
        self.storage.set(CART_KEY, &blob)?;
        self.cart = candidate;
        Ok(())
    }
}

/// Rebuild the cart from the persisted blob, failing soft to empty.
fn rehydrate(storage: &dyn BlobStore, catalog: &ProductCatalog) -> Cart {
    let blob = match storage.get(CART_KEY) {
        Ok(Some(blob)) if !blob.is_empty() => blob,
        Ok(_) => return Cart::new(),
        Err(e) => {
            tracing::warn!("failed to read persisted cart, starting empty: {e}");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Cart>(&blob) {
        Ok(cart) => sanitize(cart, catalog),
        Err(e) => {
            tracing::warn!("persisted cart is malformed, starting empty: {e}");
            Cart::new()
        }
    }
}

/// Re-establish the cart invariants against the current catalog: drop
/// orphaned, out-of-stock, zero-quantity, and duplicate lines; clamp
/// quantities to the stock ceiling.
fn sanitize(cart: Cart, catalog: &ProductCatalog) -> Cart {
    let mut lines: Vec<CartLine> = Vec::new();
    for mut line in cart.into_lines() {
        let Some(product) = catalog.find_by_id(line.product_id) else {
            tracing::warn!(product_id = %line.product_id, "dropping cart line for unknown product");
            continue;
        };
        if !product.in_stock() || line.quantity == 0 {
            continue;
        }
        if lines.iter().any(|kept| kept.product_id == line.product_id) {
            continue;
        }
        if line.quantity > product.stock {
            line.quantity = product.stock;
        }
        lines.push(line);
    }
    Cart::from_lines(lines)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use tienda_core::{CurrencyCode, Product};

    use super::*;
    use crate::storage::MemoryStore;

    fn product(id: i32, cents: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::new(Decimal::new(cents, 2), CurrencyCode::USD),
            stock,
            category: "Test".to_string(),
            image: "https://example.com/p.jpg".parse().unwrap(),
            featured: false,
        }
    }

    /// Test catalog: id 1 has stock 5, id 3 has stock 15 at 79.99, id 9 is
    /// out of stock.
    fn catalog() -> ProductCatalog {
        ProductCatalog::new(vec![
            product(1, 99999, 5),
            product(3, 7999, 15),
            product(9, 1999, 0),
        ])
    }

    fn open_store() -> (ProductCatalog, Arc<MemoryStore>, CartStore) {
        let catalog = catalog();
        let storage = Arc::new(MemoryStore::new());
        let store = CartStore::open(Box::new(Arc::clone(&storage)), &catalog);
        (catalog, storage, store)
    }

    #[test]
    fn test_add_new_product_starts_at_quantity_one() {
        let (catalog, _, mut store) = open_store();
        let count = store.add(&catalog, ProductId::new(3)).unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.cart().line(ProductId::new(3)).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_succeeds_exactly_stock_times() {
        let (catalog, _, mut store) = open_store();
        let id = ProductId::new(1);
        for expected in 1..=5 {
            assert_eq!(store.add(&catalog, id).unwrap(), expected);
        }
        // The sixth add fails and the quantity stays at the ceiling
        assert!(matches!(
            store.add(&catalog, id),
            Err(CartError::InsufficientStock(_))
        ));
        assert_eq!(store.cart().line(id).unwrap().quantity, 5);
    }

    #[test]
    fn test_add_zero_stock_product_is_unavailable() {
        let (catalog, _, mut store) = open_store();
        assert!(matches!(
            store.add(&catalog, ProductId::new(9)),
            Err(CartError::ProductUnavailable(_))
        ));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_add_unknown_product_is_unavailable() {
        let (catalog, _, mut store) = open_store();
        assert!(matches!(
            store.add(&catalog, ProductId::new(99)),
            Err(CartError::ProductUnavailable(_))
        ));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_add_update_remove_sequence() {
        // Catalog has {id: 3, stock: 15, price: 79.99}
        let (catalog, _, mut store) = open_store();
        let id = ProductId::new(3);

        assert_eq!(store.add(&catalog, id).unwrap(), 1);
        assert_eq!(store.total_quantity(), 1);

        assert_eq!(
            store.set_quantity(&catalog, id, 5).unwrap(),
            QuantityChange::Updated { quantity: 6 }
        );
        assert_eq!(store.subtotal().amount, Decimal::new(47994, 2)); // 479.94

        assert_eq!(
            store.set_quantity(&catalog, id, -10).unwrap(),
            QuantityChange::Removed
        );
        assert!(store.cart().is_empty());
        assert_eq!(store.total_quantity(), 0);
    }

    #[test]
    fn test_set_quantity_beyond_stock_changes_nothing() {
        let (catalog, _, mut store) = open_store();
        let id = ProductId::new(1);
        store.add(&catalog, id).unwrap();
        let before = store.cart().clone();

        assert!(matches!(
            store.set_quantity(&catalog, id, 5),
            Err(CartError::InsufficientStock(_))
        ));
        assert_eq!(store.cart(), &before);
    }

    #[test]
    fn test_set_quantity_on_absent_line_is_item_not_found() {
        let (catalog, _, mut store) = open_store();
        assert!(matches!(
            store.set_quantity(&catalog, ProductId::new(1), 1),
            Err(CartError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_set_quantity_negative_total_equals_remove() {
        let (catalog, _, mut left) = open_store();
        let (_, _, mut right) = open_store();
        let id = ProductId::new(3);

        left.add(&catalog, id).unwrap();
        left.add(&catalog, id).unwrap();
        right.add(&catalog, id).unwrap();
        right.add(&catalog, id).unwrap();

        left.set_quantity(&catalog, id, -2).unwrap();
        right.remove(id).unwrap();
        assert_eq!(left.cart(), right.cart());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (catalog, _, mut store) = open_store();
        let id = ProductId::new(1);
        store.add(&catalog, id).unwrap();

        assert!(store.remove(id).unwrap());
        let after_first = store.cart().clone();
        assert!(!store.remove(id).unwrap());
        assert_eq!(store.cart(), &after_first);
    }

    #[test]
    fn test_every_mutation_persists() {
        let (catalog, storage, mut store) = open_store();
        let id = ProductId::new(3);

        store.add(&catalog, id).unwrap();
        let blob = storage.get(CART_KEY).unwrap().unwrap();
        assert_eq!(blob, store.serialize().unwrap());

        store.set_quantity(&catalog, id, 2).unwrap();
        let blob = storage.get(CART_KEY).unwrap().unwrap();
        assert_eq!(blob, store.serialize().unwrap());

        store.remove(id).unwrap();
        let blob = storage.get(CART_KEY).unwrap().unwrap();
        assert_eq!(blob, "[]");
    }

    #[test]
    fn test_reopen_round_trips_the_cart() {
        let (catalog, storage, mut store) = open_store();
        store.add(&catalog, ProductId::new(3)).unwrap();
        store.add(&catalog, ProductId::new(1)).unwrap();
        store.set_quantity(&catalog, ProductId::new(3), 4).unwrap();

        let reopened = CartStore::open(Box::new(Arc::clone(&storage)), &catalog);
        assert_eq!(reopened.cart(), store.cart());
    }

    #[test]
    fn test_rehydrate_missing_empty_or_malformed_is_empty() {
        let catalog = catalog();
        for blob in [None, Some(""), Some("not json"), Some("{\"a\":1}")] {
            let storage = MemoryStore::new();
            if let Some(blob) = blob {
                storage.set(CART_KEY, blob).unwrap();
            }
            let store = CartStore::open(Box::new(storage), &catalog);
            assert!(store.cart().is_empty());
        }
    }

    #[test]
    fn test_rehydrate_drops_orphans_and_clamps_quantities() {
        let catalog = catalog();
        let storage = MemoryStore::new();
        // id 42 is unknown, id 9 is out of stock, id 1 is over its stock of 5
        storage
            .set(
                CART_KEY,
                r#"[
                    {"product_id": 42, "name": "Ghost", "price": {"amount": "1.00", "currency_code": "USD"}, "quantity": 1, "image": "https://example.com/g.jpg"},
                    {"product_id": 9, "name": "Product 9", "price": {"amount": "19.99", "currency_code": "USD"}, "quantity": 2, "image": "https://example.com/p.jpg"},
                    {"product_id": 1, "name": "Product 1", "price": {"amount": "999.99", "currency_code": "USD"}, "quantity": 12, "image": "https://example.com/p.jpg"}
                ]"#,
            )
            .unwrap();

        let store = CartStore::open(Box::new(storage), &catalog);
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().line(ProductId::new(1)).unwrap().quantity, 5);
    }

    #[test]
    fn test_failed_persist_rolls_back() {
        /// A store whose writes always fail.
        struct BrokenStore;
        impl BlobStore for BrokenStore {
            fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }
            fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Io(std::io::Error::other("disk full")))
            }
        }

        let catalog = catalog();
        let mut store = CartStore::open(Box::new(BrokenStore), &catalog);
        assert!(matches!(
            store.add(&catalog, ProductId::new(1)),
            Err(CartError::Storage(_))
        ));
        assert!(store.cart().is_empty());
    }
}
