//! # Warehouse
//!
//! An ordered, id-unique collection of products, plus the registry that owns
//! named warehouses.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main()                                                                 │
//! │    └── WarehouseRegistry            (owned by the entry point)          │
//! │          ├── "north" ──► Warehouse  (owns its products exclusively)    │
//! │          └── "south" ──► Warehouse                                     │
//! │                              │                                          │
//! │                              ▼  &Warehouse (shared borrow)              │
//! │                       WarehouseAnalyzer                                 │
//! │                                                                         │
//! │  While an analyzer borrows a warehouse, nothing can mutate it: the     │
//! │  borrow checker provides the read snapshot.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::category::Category;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::product::{Product, ProductId};
use crate::validation::ValidationResult;

// =============================================================================
// Warehouse
// =============================================================================

/// A named inventory of products in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Warehouse {
    name: String,
    products: Vec<Product>,
    changed: HashSet<ProductId>,
}

impl Warehouse {
    /// Creates an empty warehouse.
    pub fn new(name: impl Into<String>) -> Self {
        Warehouse {
            name: name.into(),
            products: Vec::new(),
            changed: HashSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a product at the end of the inventory.
    ///
    /// ## Errors
    /// `Duplicate` when a product with the same id is already stored.
    pub fn add_product(&mut self, product: Product) -> ValidationResult<()> {
        if self.product_by_id(product.id()).is_some() {
            warn!(warehouse = %self.name, id = %product.id(), "Rejected duplicate product id");
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id().to_string(),
            });
        }

        debug!(
            warehouse = %self.name,
            id = %product.id(),
            name = %product.name(),
            price = %product.price(),
            "Added product"
        );
        self.products.push(product);
        Ok(())
    }

    /// Snapshot of all products, in insertion order.
    ///
    /// The returned vector is a copy; changing the warehouse afterwards does
    /// not change it.
    pub fn products(&self) -> Vec<Product> {
        self.products.clone()
    }

    /// Borrowing iterator over the products, in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Products that can be shipped, in insertion order.
    pub fn shippable_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_shippable()).collect()
    }

    pub fn product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Removes a product, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id() == id)?;
        self.changed.remove(&id);
        let removed = self.products.remove(index);
        debug!(warehouse = %self.name, id = %id, "Removed product");
        Some(removed)
    }

    /// Sets a new price and records the product as changed.
    ///
    /// ## Errors
    /// - `ProductNotFound` when no product has this id
    /// - `Validation` when the price is negative
    pub fn update_product_price(&mut self, id: ProductId, price: Money) -> CoreResult<()> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        let old_price = product.price();
        product.set_price(price)?;
        self.changed.insert(id);

        debug!(
            warehouse = %self.name,
            id = %id,
            old_price = %old_price,
            new_price = %price,
            "Updated product price"
        );
        Ok(())
    }

    /// Products whose price was updated, in insertion order.
    pub fn changed_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| self.changed.contains(&p.id()))
            .collect()
    }

    /// Perishable products whose expiration date is before `today`.
    pub fn expired_products(&self, today: NaiveDate) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.as_perishable().is_some_and(|per| per.is_expired_on(today)))
            .collect()
    }

    /// Products grouped by category; each group keeps insertion order.
    pub fn products_grouped_by_category(&self) -> HashMap<Category, Vec<&Product>> {
        let mut groups: HashMap<Category, Vec<&Product>> = HashMap::new();
        for product in &self.products {
            groups
                .entry(product.category().clone())
                .or_default()
                .push(product);
        }
        groups
    }

    pub fn clear_products(&mut self) {
        info!(warehouse = %self.name, removed = self.products.len(), "Cleared products");
        self.products.clear();
        self.changed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }
}

impl<'a> IntoIterator for &'a Warehouse {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Warehouse Registry
// =============================================================================

/// Named warehouses, created lazily on first request.
///
/// ## Example
/// ```rust
/// use stockwise_core::warehouse::WarehouseRegistry;
///
/// let mut registry = WarehouseRegistry::new();
/// registry.get_or_create("north");
/// registry.get_or_create("north");
///
/// assert_eq!(registry.names(), vec!["north"]);
/// assert!(registry.get("south").is_none());
/// ```
#[derive(Debug, Default)]
pub struct WarehouseRegistry {
    warehouses: HashMap<String, Warehouse>,
}

impl WarehouseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the warehouse called `name`, creating an empty one if needed.
    pub fn get_or_create(&mut self, name: &str) -> &mut Warehouse {
        self.warehouses.entry(name.to_string()).or_insert_with(|| {
            info!(warehouse = %name, "Created warehouse");
            Warehouse::new(name)
        })
    }

    pub fn get(&self, name: &str) -> Option<&Warehouse> {
        self.warehouses.get(name)
    }

    /// Warehouse names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.warehouses.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.warehouses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warehouses.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
