//! # Product Model
//!
//! Products and their optional capabilities.
//!
//! ## Capabilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     ProductKind → Capabilities                          │
//! │                                                                         │
//! │   Kind          Perishable        Shippable      Shipping cost          │
//! │   ───────────   ───────────────   ────────────   ─────────────────────  │
//! │   Food          expiration_date   weight         flat $10.00            │
//! │   Electronics   -                 weight         $79.00 (+$49 > 5 kg)   │
//! │   General       -                 -              -                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers never match on the kind to reach a capability; they ask:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use stockwise_core::category::CategoryRegistry;
//! use stockwise_core::money::Money;
//! use stockwise_core::product::Product;
//! use stockwise_core::weight::Weight;
//!
//! let mut categories = CategoryRegistry::new();
//! let milk = Product::food(
//!     "Milk",
//!     categories.category("dairy").unwrap(),
//!     Money::from_cents(1500),
//!     NaiveDate::from_ymd_opt(2030, 1, 31).unwrap(),
//!     Weight::from_kg(Decimal::ONE).unwrap(),
//! )
//! .unwrap();
//!
//! assert!(milk.as_perishable().is_some());
//! assert_eq!(
//!     milk.as_shippable().map(|s| s.calculate_shipping_cost()),
//!     Some(Money::from_cents(1000))
//! );
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::category::Category;
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name, ValidationResult};
use crate::weight::Weight;

/// Flat shipping cost for food.
pub const FOOD_SHIPPING_COST: Money = Money::from_cents(1_000);

/// Base shipping cost for electronics.
pub const ELECTRONICS_BASE_SHIPPING_COST: Money = Money::from_cents(7_900);

/// Surcharge for electronics heavier than [`HEAVY_ELECTRONICS_KG`].
pub const HEAVY_ELECTRONICS_SURCHARGE: Money = Money::from_cents(4_900);

/// Weight above which electronics pay the heavy surcharge.
pub const HEAVY_ELECTRONICS_KG: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

// =============================================================================
// Product Id
// =============================================================================

/// Unique product identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// A product with an expiration date.
pub trait Perishable {
    fn expiration_date(&self) -> NaiveDate;

    /// Expired means the expiration date is strictly before `today`.
    fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiration_date() < today
    }

    /// Signed whole days from `today` to the expiration date.
    /// Negative once the product has expired.
    fn days_until_expiration(&self, today: NaiveDate) -> i64 {
        (self.expiration_date() - today).num_days()
    }
}

/// A product that can be shipped.
pub trait Shippable {
    fn weight(&self) -> Weight;

    /// Shipping cost; a pure function of the weight and the product kind.
    fn calculate_shipping_cost(&self) -> Money;
}

/// Capability data for food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodDetails {
    pub expiration_date: NaiveDate,
    pub weight: Weight,
}

impl Perishable for FoodDetails {
    fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }
}

impl Shippable for FoodDetails {
    fn weight(&self) -> Weight {
        self.weight
    }

    fn calculate_shipping_cost(&self) -> Money {
        FOOD_SHIPPING_COST
    }
}

/// Capability data for electronics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectronicsDetails {
    pub warranty_months: u32,
    pub weight: Weight,
}

impl Shippable for ElectronicsDetails {
    fn weight(&self) -> Weight {
        self.weight
    }

    fn calculate_shipping_cost(&self) -> Money {
        if self.weight.kg() > HEAVY_ELECTRONICS_KG {
            ELECTRONICS_BASE_SHIPPING_COST + HEAVY_ELECTRONICS_SURCHARGE
        } else {
            ELECTRONICS_BASE_SHIPPING_COST
        }
    }
}

/// What kind of product this is, carrying the data its capabilities need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    Food(FoodDetails),
    Electronics(ElectronicsDetails),
    General,
}

// =============================================================================
// Product
// =============================================================================

/// A product held in a warehouse.
///
/// Identity, name, category and kind are fixed at construction; only the
/// price changes afterwards, and only through [`Product::set_price`].
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: Category,
    price: Money,
    #[serde(flatten)]
    kind: ProductKind,
}

impl Product {
    /// Creates a product with a fresh id.
    ///
    /// ## Errors
    /// - `Required` / `TooLong` for a bad name
    /// - `OutOfRange` for a negative price
    pub fn new(
        name: impl Into<String>,
        category: Category,
        price: Money,
        kind: ProductKind,
    ) -> ValidationResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;

        Ok(Product {
            id: ProductId::new(),
            name: name.trim().to_string(),
            category,
            price,
            kind,
        })
    }

    /// Creates a perishable, shippable food product.
    pub fn food(
        name: impl Into<String>,
        category: Category,
        price: Money,
        expiration_date: NaiveDate,
        weight: Weight,
    ) -> ValidationResult<Self> {
        Product::new(
            name,
            category,
            price,
            ProductKind::Food(FoodDetails {
                expiration_date,
                weight,
            }),
        )
    }

    /// Creates a shippable electronics product.
    pub fn electronics(
        name: impl Into<String>,
        category: Category,
        price: Money,
        warranty_months: u32,
        weight: Weight,
    ) -> ValidationResult<Self> {
        Product::new(
            name,
            category,
            price,
            ProductKind::Electronics(ElectronicsDetails {
                warranty_months,
                weight,
            }),
        )
    }

    /// Creates a product with no capabilities.
    pub fn general(
        name: impl Into<String>,
        category: Category,
        price: Money,
    ) -> ValidationResult<Self> {
        Product::new(name, category, price, ProductKind::General)
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Updates the price; negative prices are rejected and leave the
    /// product unchanged.
    pub fn set_price(&mut self, price: Money) -> ValidationResult<()> {
        validate_price(price)?;
        self.price = price;
        Ok(())
    }

    /// The perishable capability, if this kind has one.
    pub fn as_perishable(&self) -> Option<&dyn Perishable> {
        match &self.kind {
            ProductKind::Food(food) => Some(food),
            ProductKind::Electronics(_) | ProductKind::General => None,
        }
    }

    /// The shippable capability, if this kind has one.
    pub fn as_shippable(&self) -> Option<&dyn Shippable> {
        match &self.kind {
            ProductKind::Food(food) => Some(food),
            ProductKind::Electronics(electronics) => Some(electronics),
            ProductKind::General => None,
        }
    }

    pub fn is_perishable(&self) -> bool {
        self.as_perishable().is_some()
    }

    pub fn is_shippable(&self) -> bool {
        self.as_shippable().is_some()
    }

    /// One-line human readable description.
    pub fn product_details(&self) -> String {
        match &self.kind {
            ProductKind::Food(food) => format!(
                "Food: {}, Expires: {}, Weight: {}",
                self.name, food.expiration_date, food.weight
            ),
            ProductKind::Electronics(electronics) => format!(
                "Electronics: {}, Warranty: {} months",
                self.name, electronics.warranty_months
            ),
            ProductKind::General => format!("Product: {}", self.name),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
