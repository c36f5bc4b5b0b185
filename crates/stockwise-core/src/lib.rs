//! # stockwise-core: Pure Inventory Logic for Stockwise
//!
//! This crate is the **heart** of Stockwise. It models a warehouse of
//! products and answers analytical questions about it, as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockwise Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 stockwise-report (binary)                       │   │
//! │  │    config ──► seed inventory ──► run analyzer ──► JSON report   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockwise-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │ warehouse │  │ analyzer  │  │ shipping  │  │   │
//! │  │   │ Category  │  │ Registry  │  │ Validation│  │   FFD     │  │   │
//! │  │   │  Money    │  │           │  │ Statistics│  │  stats    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - Products and their Perishable / Shippable capabilities
//! - [`category`] - Interned categories and their registry
//! - [`warehouse`] - Product collection and the warehouse registry
//! - [`analyzer`] - Search, analytics and business-rule queries
//! - [`shipping`] - Shipping groups and first-fit-decreasing packing
//! - [`stats`] - Percentiles and IQR outlier fences
//! - [`money`] - Money type with integer arithmetic
//! - [`weight`] - Exact decimal weights
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same warehouse + same date = same answer
//! 2. **No I/O**: the binary owns configuration, logging setup and output
//! 3. **Integer Money**: prices are cents (i64); rounding is explicit and half-up
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use stockwise_core::{CategoryRegistry, Money, Product, Warehouse, WarehouseAnalyzer, Weight};
//!
//! let mut categories = CategoryRegistry::new();
//! let dairy = categories.category("dairy").unwrap();
//! let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
//!
//! let mut warehouse = Warehouse::new("main");
//! let milk = Product::food(
//!     "Milk",
//!     dairy,
//!     Money::from_cents(10000),
//!     today,
//!     Weight::from_kg(Decimal::ONE).unwrap(),
//! )
//! .unwrap();
//! let milk_id = milk.id();
//! warehouse.add_product(milk).unwrap();
//!
//! let analyzer = WarehouseAnalyzer::new(&warehouse).as_of(today);
//! let discounts = analyzer.calculate_expiration_based_discounts();
//!
//! // Expires today: half price
//! assert_eq!(discounts[&milk_id], Money::from_cents(5000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analyzer;
pub mod category;
pub mod error;
pub mod money;
pub mod product;
pub mod shipping;
pub mod stats;
pub mod validation;
pub mod warehouse;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockwise_core::Money` instead of
// `use stockwise_core::money::Money`

pub use analyzer::{AnalyzerConfig, InventoryStatistics, InventoryValidation, WarehouseAnalyzer};
pub use category::{Category, CategoryRegistry};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use product::{Perishable, Product, ProductId, ProductKind, Shippable};
pub use shipping::ShippingGroup;
pub use warehouse::{Warehouse, WarehouseRegistry};
pub use weight::Weight;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default look-ahead window for "expiring soon" queries, in days.
///
/// Matches the last discount tier: anything within three days is discounted.
pub const DEFAULT_EXPIRING_WITHIN_DAYS: u32 = 3;
