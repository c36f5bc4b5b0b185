//! # Warehouse Analyzer
//!
//! Read-only analytics over one warehouse.
//!
//! ## Query Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      WarehouseAnalyzer<'a>                              │
//! │                                                                         │
//! │  Search & Filter                  Analytics                             │
//! │  ─────────────────────────────    ────────────────────────────────────  │
//! │  find_products_in_price_range     calculate_weighted_average_price_...  │
//! │  find_products_expiring_within_.. find_price_outliers (IQR fences)      │
//! │  search_products_by_name          optimize_shipping_groups (FFD)        │
//! │  find_products_above_price                                              │
//! │                                                                         │
//! │  Business Rules                                                         │
//! │  ─────────────────────────────                                          │
//! │  calculate_expiration_based_discounts                                   │
//! │  validate_inventory_constraints   → InventoryValidation                 │
//! │  get_inventory_statistics         → InventoryStatistics                 │
//! │                                                                         │
//! │  &'a Warehouse ──► every query reads the current products, none writes │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reference Date
//! Expiration logic compares against `today`. [`WarehouseAnalyzer::new`]
//! uses the current UTC date; [`WarehouseAnalyzer::as_of`] pins it, which
//! keeps results reproducible.
//!
//! ## Example
//! ```rust
//! use chrono::NaiveDate;
//! use stockwise_core::analyzer::WarehouseAnalyzer;
//! use stockwise_core::category::CategoryRegistry;
//! use stockwise_core::money::Money;
//! use stockwise_core::product::Product;
//! use stockwise_core::warehouse::Warehouse;
//!
//! let mut categories = CategoryRegistry::new();
//! let books = categories.category("books").unwrap();
//!
//! let mut warehouse = Warehouse::new("main");
//! for (name, cents) in [("Atlas", 4500), ("Novel", 1200), ("Lexicon", 9900)] {
//!     let product = Product::general(name, books.clone(), Money::from_cents(cents)).unwrap();
//!     warehouse.add_product(product).unwrap();
//! }
//!
//! let analyzer = WarehouseAnalyzer::new(&warehouse)
//!     .as_of(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
//!
//! let mid_priced = analyzer
//!     .find_products_in_price_range(Money::from_cents(1200), Money::from_cents(4500))
//!     .unwrap();
//! let names: Vec<&str> = mid_priced.iter().map(|p| p.name()).collect();
//! assert_eq!(names, vec!["Atlas", "Novel"]);
//!
//! let stats = analyzer.get_inventory_statistics();
//! assert_eq!(stats.total_value(), Money::from_cents(15600));
//! assert_eq!(stats.average_price(), Money::from_cents(5200));
//! ```

use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::category::Category;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::{Product, ProductId};
use crate::shipping::{first_fit_decreasing, ShippingGroup};
use crate::stats::Quartiles;
use crate::validation::{
    validate_max_weight, validate_price, validate_price_range, validate_threshold,
    ValidationResult,
};
use crate::warehouse::Warehouse;

/// Discount factors in basis points, by whole days until expiration.
const EXPIRES_TODAY_BPS: u32 = 5_000;
const EXPIRES_TOMORROW_BPS: u32 = 7_000;
const EXPIRES_SOON_BPS: u32 = 8_500;
const FULL_PRICE_BPS: u32 = 10_000;

// =============================================================================
// Configuration
// =============================================================================

/// Tunable thresholds for the business-rule queries.
///
/// ## Defaults
/// | Setting                        | Default   |
/// |--------------------------------|-----------|
/// | `high_value_threshold`         | $1000.00  |
/// | `high_value_warning_percentage`| 70.0      |
/// | `minimum_category_diversity`   | 2         |
/// | `outlier_threshold`            | 1.5       |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Products priced at or above this are high value.
    pub high_value_threshold: Money,

    /// A high-value share strictly above this percentage raises a warning.
    pub high_value_warning_percentage: f64,

    /// Distinct categories needed to count as diverse.
    pub minimum_category_diversity: usize,

    /// IQR multiplier used by [`WarehouseAnalyzer::find_price_outliers_default`].
    pub outlier_threshold: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            high_value_threshold: Money::from_cents(100_000),
            high_value_warning_percentage: 70.0,
            minimum_category_diversity: 2,
            outlier_threshold: 1.5,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_price(self.high_value_threshold)?;
        validate_threshold("high value warning percentage", self.high_value_warning_percentage)?;
        validate_threshold("outlier threshold", self.outlier_threshold)?;
        Ok(())
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// Outcome of the inventory business-rule checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryValidation {
    high_value_percentage: f64,
    category_diversity: usize,
    high_value_warning: bool,
    minimum_diversity: bool,
}

impl InventoryValidation {
    pub(crate) fn new(
        high_value_percentage: f64,
        category_diversity: usize,
        config: &AnalyzerConfig,
    ) -> Self {
        InventoryValidation {
            high_value_percentage,
            category_diversity,
            high_value_warning: high_value_percentage > config.high_value_warning_percentage,
            minimum_diversity: category_diversity >= config.minimum_category_diversity,
        }
    }

    /// Share of high-value products, 0–100.
    pub fn high_value_percentage(&self) -> f64 {
        self.high_value_percentage
    }

    /// Number of distinct categories.
    pub fn category_diversity(&self) -> usize {
        self.category_diversity
    }

    pub fn is_high_value_warning(&self) -> bool {
        self.high_value_warning
    }

    pub fn has_minimum_diversity(&self) -> bool {
        self.minimum_diversity
    }
}

/// Aggregate figures for one inventory snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryStatistics<'a> {
    total_products: usize,
    total_value: Money,
    average_price: Money,
    expired_count: usize,
    category_count: usize,
    most_expensive_product: Option<&'a Product>,
    cheapest_product: Option<&'a Product>,
}

impl<'a> InventoryStatistics<'a> {
    pub fn total_products(&self) -> usize {
        self.total_products
    }

    pub fn total_value(&self) -> Money {
        self.total_value
    }

    /// Mean price rounded half-up to the cent; zero for an empty inventory.
    pub fn average_price(&self) -> Money {
        self.average_price
    }

    pub fn expired_count(&self) -> usize {
        self.expired_count
    }

    pub fn category_count(&self) -> usize {
        self.category_count
    }

    /// The first product holding the highest price.
    pub fn most_expensive_product(&self) -> Option<&'a Product> {
        self.most_expensive_product
    }

    /// The first product holding the lowest price.
    pub fn cheapest_product(&self) -> Option<&'a Product> {
        self.cheapest_product
    }
}

// =============================================================================
// Analyzer
// =============================================================================

/// Stateless query engine over a borrowed warehouse.
#[derive(Debug, Clone)]
pub struct WarehouseAnalyzer<'a> {
    warehouse: &'a Warehouse,
    config: AnalyzerConfig,
    today: NaiveDate,
}

impl<'a> WarehouseAnalyzer<'a> {
    /// Creates an analyzer with default thresholds, dated today (UTC).
    pub fn new(warehouse: &'a Warehouse) -> Self {
        WarehouseAnalyzer {
            warehouse,
            config: AnalyzerConfig::default(),
            today: Utc::now().date_naive(),
        }
    }

    /// Replaces the thresholds after validating them.
    pub fn with_config(mut self, config: AnalyzerConfig) -> ValidationResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Pins the reference date used by the expiration queries.
    pub fn as_of(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn warehouse(&self) -> &'a Warehouse {
        self.warehouse
    }

    // -------------------------------------------------------------------------
    // Search & Filter
    // -------------------------------------------------------------------------

    /// Products with `min <= price <= max`, in warehouse order.
    ///
    /// ## Errors
    /// `InvalidRange` when `min > max`.
    pub fn find_products_in_price_range(
        &self,
        min: Money,
        max: Money,
    ) -> ValidationResult<Vec<&'a Product>> {
        if let Err(err) = validate_price_range(min, max) {
            warn!(%min, %max, "Rejected inverted price range");
            return Err(err);
        }

        let found: Vec<&'a Product> = self
            .warehouse
            .iter()
            .filter(|p| (min..=max).contains(&p.price()))
            .collect();

        debug!(%min, %max, count = found.len(), "Price range query");
        Ok(found)
    }

    /// Perishable products expiring between today and `today + days`,
    /// both inclusive. Already expired products are excluded.
    pub fn find_products_expiring_within_days(&self, days: u32) -> Vec<&'a Product> {
        let end = self
            .today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);

        let found: Vec<&'a Product> = self
            .warehouse
            .iter()
            .filter(|p| {
                p.as_perishable()
                    .is_some_and(|per| (self.today..=end).contains(&per.expiration_date()))
            })
            .collect();

        debug!(days, today = %self.today, count = found.len(), "Expiring products query");
        found
    }

    /// Case-insensitive substring search on product names. An empty term
    /// matches every product.
    pub fn search_products_by_name(&self, term: &str) -> Vec<&'a Product> {
        let term = term.to_lowercase();

        let found: Vec<&'a Product> = self
            .warehouse
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&term))
            .collect();

        debug!(term = %term, count = found.len(), "Name search");
        found
    }

    /// Products priced strictly above `threshold`.
    pub fn find_products_above_price(&self, threshold: Money) -> Vec<&'a Product> {
        let found: Vec<&'a Product> = self
            .warehouse
            .iter()
            .filter(|p| p.price() > threshold)
            .collect();

        debug!(%threshold, count = found.len(), "Above-price query");
        found
    }

    // -------------------------------------------------------------------------
    // Analytics
    // -------------------------------------------------------------------------

    /// Average price per category, weighted by shipping weight.
    ///
    /// For each category the result is Σ(price × weight) / Σ(weight) over
    /// its shippable products. A category without shippable products falls
    /// back to the plain mean of its prices. Results are rounded half-up to
    /// the cent.
    ///
    /// ## Errors
    /// `ArithmeticOverflow` if an intermediate sum leaves the decimal range.
    pub fn calculate_weighted_average_price_by_category(
        &self,
    ) -> CoreResult<HashMap<Category, Money>> {
        let groups = self.warehouse.products_grouped_by_category();
        let mut averages = HashMap::with_capacity(groups.len());

        for (category, products) in groups {
            let average = weighted_average_price(&products)?;
            debug!(category = %category, %average, members = products.len(), "Category average");
            averages.insert(category, average);
        }

        Ok(averages)
    }

    /// Products whose price falls outside the IQR fences
    /// `[Q1 − threshold × IQR, Q3 + threshold × IQR]`.
    ///
    /// ## Errors
    /// `OutOfRange` / `InvalidFormat` for a negative or non-finite threshold.
    pub fn find_price_outliers(&self, threshold: f64) -> ValidationResult<Vec<&'a Product>> {
        validate_threshold("outlier threshold", threshold)?;

        let prices: Vec<f64> = self.warehouse.iter().map(|p| p.price().to_f64()).collect();
        let Some(quartiles) = Quartiles::from_values(&prices) else {
            return Ok(Vec::new());
        };
        let fences = quartiles.fences(threshold)?;

        let outliers: Vec<&'a Product> = self
            .warehouse
            .iter()
            .filter(|p| fences.is_outlier(p.price().to_f64()))
            .collect();

        debug!(
            threshold,
            q1 = quartiles.q1,
            q3 = quartiles.q3,
            lower = fences.lower,
            upper = fences.upper,
            count = outliers.len(),
            "Price outlier query"
        );
        Ok(outliers)
    }

    /// [`find_price_outliers`](Self::find_price_outliers) with the configured
    /// threshold.
    pub fn find_price_outliers_default(&self) -> ValidationResult<Vec<&'a Product>> {
        self.find_price_outliers(self.config.outlier_threshold)
    }

    /// Packs every shippable product into groups of at most `max_weight` kg
    /// using first-fit decreasing.
    ///
    /// Every shippable product lands in exactly one group. A product that is
    /// heavier than `max_weight` on its own ships alone.
    ///
    /// ## Errors
    /// `MustBePositive` when `max_weight <= 0`.
    pub fn optimize_shipping_groups(
        &self,
        max_weight: Decimal,
    ) -> ValidationResult<Vec<ShippingGroup<'a>>> {
        validate_max_weight(max_weight)?;

        let items = self.warehouse.shippable_products();
        let item_count = items.len();
        for product in items.iter().filter(|p| item_weight(p) > max_weight) {
            warn!(
                product = %product.name(),
                weight = %item_weight(product),
                %max_weight,
                "Shippable product exceeds group capacity, shipping alone"
            );
        }

        let groups: Vec<ShippingGroup<'a>> = first_fit_decreasing(items, |p| item_weight(p), max_weight)
            .into_iter()
            .map(ShippingGroup::new)
            .collect();

        debug!(%max_weight, items = item_count, groups = groups.len(), "Shipping groups packed");
        Ok(groups)
    }

    // -------------------------------------------------------------------------
    // Business Rules
    // -------------------------------------------------------------------------

    /// Discounted price for every product, keyed by product id.
    ///
    /// ## Discount Tiers (perishables)
    /// ```text
    /// days until expiration   price factor
    /// ─────────────────────   ────────────
    ///          0                 × 0.50
    ///          1                 × 0.70
    ///        2 or 3              × 0.85
    ///   otherwise (incl. < 0)    × 1.00
    /// ```
    /// Non-perishable products keep their price.
    pub fn calculate_expiration_based_discounts(&self) -> HashMap<ProductId, Money> {
        let discounts: HashMap<ProductId, Money> = self
            .warehouse
            .iter()
            .map(|p| {
                let price = match p.as_perishable() {
                    Some(per) => {
                        let bps = discount_bps(per.days_until_expiration(self.today));
                        p.price().scale_bps(bps)
                    }
                    None => p.price(),
                };
                (p.id(), price)
            })
            .collect();

        debug!(today = %self.today, count = discounts.len(), "Expiration discounts");
        discounts
    }

    /// High-value share and category diversity of the inventory.
    pub fn validate_inventory_constraints(&self) -> InventoryValidation {
        let total = self.warehouse.len();
        if total == 0 {
            return InventoryValidation::new(0.0, 0, &self.config);
        }

        let high_value = self
            .warehouse
            .iter()
            .filter(|p| p.price() >= self.config.high_value_threshold)
            .count();
        let percentage = high_value as f64 * 100.0 / total as f64;
        let validation = InventoryValidation::new(percentage, self.category_count(), &self.config);

        debug!(
            percentage,
            diversity = validation.category_diversity(),
            warning = validation.is_high_value_warning(),
            "Inventory constraints"
        );
        validation
    }

    /// Totals, averages and extremes for the current inventory.
    pub fn get_inventory_statistics(&self) -> InventoryStatistics<'a> {
        let total_products = self.warehouse.len();
        let total_value: Money = self.warehouse.iter().map(Product::price).sum();
        let expired_count = self
            .warehouse
            .iter()
            .filter(|p| p.as_perishable().is_some_and(|per| per.is_expired_on(self.today)))
            .count();

        // Strict comparisons keep the first product holding an extreme price.
        let most_expensive_product = self
            .warehouse
            .iter()
            .reduce(|best, p| if p.price() > best.price() { p } else { best });
        let cheapest_product = self
            .warehouse
            .iter()
            .reduce(|best, p| if p.price() < best.price() { p } else { best });

        let statistics = InventoryStatistics {
            total_products,
            total_value,
            average_price: total_value.div_rounded(total_products),
            expired_count,
            category_count: self.category_count(),
            most_expensive_product,
            cheapest_product,
        };

        debug!(
            total_products,
            total_value = %statistics.total_value,
            average_price = %statistics.average_price,
            expired_count,
            "Inventory statistics"
        );
        statistics
    }

    fn category_count(&self) -> usize {
        self.warehouse
            .iter()
            .map(Product::category)
            .collect::<HashSet<_>>()
            .len()
    }
}

fn item_weight(product: &Product) -> Decimal {
    product
        .as_shippable()
        .map(|s| s.weight().kg())
        .unwrap_or(Decimal::ZERO)
}

fn discount_bps(days_until_expiration: i64) -> u32 {
    match days_until_expiration {
        0 => EXPIRES_TODAY_BPS,
        1 => EXPIRES_TOMORROW_BPS,
        2 | 3 => EXPIRES_SOON_BPS,
        _ => FULL_PRICE_BPS,
    }
}

fn weighted_average_price(products: &[&Product]) -> CoreResult<Money> {
    let overflow = || CoreError::ArithmeticOverflow {
        operation: "weighted average price".to_string(),
    };

    let mut weighted_sum = Decimal::ZERO;
    let mut weight_sum = Decimal::ZERO;
    for (product, shippable) in products
        .iter()
        .filter_map(|p| p.as_shippable().map(|s| (p, s)))
    {
        let weight = shippable.weight().kg();
        let contribution = product
            .price()
            .to_decimal()
            .checked_mul(weight)
            .ok_or_else(overflow)?;
        weighted_sum = weighted_sum.checked_add(contribution).ok_or_else(overflow)?;
        weight_sum = weight_sum.checked_add(weight).ok_or_else(overflow)?;
    }

    if weight_sum > Decimal::ZERO {
        let average = weighted_sum.checked_div(weight_sum).ok_or_else(overflow)?;
        return Money::from_decimal_rounded(average).ok_or_else(overflow);
    }

    let total: Money = products.iter().map(|p| p.price()).sum();
    Ok(total.div_rounded(products.len()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryRegistry;
    use crate::weight::Weight;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn in_days(days: i64) -> NaiveDate {
        today() + chrono::Duration::days(days)
    }

    fn kg(value: Decimal) -> Weight {
        Weight::from_kg(value).unwrap()
    }

    #[test]
    fn test_discount_tiers() {
        assert_eq!(discount_bps(0), 5_000);
        assert_eq!(discount_bps(1), 7_000);
        assert_eq!(discount_bps(2), 8_500);
        assert_eq!(discount_bps(3), 8_500);
        assert_eq!(discount_bps(4), 10_000);
        assert_eq!(discount_bps(-1), 10_000);
    }

    #[test]
    fn test_weighted_average_uses_weights() {
        let mut categories = CategoryRegistry::new();
        let dairy = categories.category("dairy").unwrap();
        let milk = Product::food("Milk", dairy.clone(), Money::from_cents(1000), in_days(5), kg(dec!(1.0)))
            .unwrap();
        let cheese = Product::food("Cheese", dairy, Money::from_cents(1500), in_days(5), kg(dec!(0.4)))
            .unwrap();

        // (10.00 × 1.0 + 15.00 × 0.4) / 1.4 = 11.428… → 11.43
        let average = weighted_average_price(&[&milk, &cheese]).unwrap();
        assert_eq!(average, Money::from_cents(1143));
    }

    #[test]
    fn test_weighted_average_ignores_unweighted_members() {
        let mut categories = CategoryRegistry::new();
        let mixed = categories.category("mixed").unwrap();
        let heavy = Product::electronics("Radio", mixed.clone(), Money::from_cents(2000), 6, kg(dec!(2)))
            .unwrap();
        let plain = Product::general("Voucher", mixed, Money::from_cents(100)).unwrap();

        let average = weighted_average_price(&[&heavy, &plain]).unwrap();
        assert_eq!(average, Money::from_cents(2000));
    }

    #[test]
    fn test_weighted_average_falls_back_to_mean() {
        let mut categories = CategoryRegistry::new();
        let misc = categories.category("misc").unwrap();
        let a = Product::general("A", misc.clone(), Money::from_cents(100)).unwrap();
        let b = Product::general("B", misc, Money::from_cents(201)).unwrap();

        // (1.00 + 2.01) / 2 = 1.505 → 1.51
        assert_eq!(weighted_average_price(&[&a, &b]).unwrap(), Money::from_cents(151));
        assert_eq!(weighted_average_price(&[]).unwrap(), Money::zero());
    }

    #[test]
    fn test_validation_flags() {
        let config = AnalyzerConfig::default();
        let validation = InventoryValidation::new(75.0, 2, &config);
        assert!(validation.is_high_value_warning());
        assert!(validation.has_minimum_diversity());

        let validation = InventoryValidation::new(70.0, 1, &config);
        assert!(!validation.is_high_value_warning());
        assert!(!validation.has_minimum_diversity());
    }

    #[test]
    fn test_config_validation() {
        assert!(AnalyzerConfig::default().validate().is_ok());

        let bad = AnalyzerConfig {
            outlier_threshold: -1.0,
            ..AnalyzerConfig::default()
        };
        assert!(bad.validate().is_err());

        let warehouse = Warehouse::new("empty");
        assert!(WarehouseAnalyzer::new(&warehouse).with_config(bad).is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{ "outlier_threshold": 3.0 }"#).unwrap();
        assert_eq!(config.outlier_threshold, 3.0);
        assert_eq!(config.high_value_threshold, Money::from_cents(100_000));
        assert_eq!(config.minimum_category_diversity, 2);
    }

    #[test]
    fn test_empty_warehouse_defaults() {
        let warehouse = Warehouse::new("empty");
        let analyzer = WarehouseAnalyzer::new(&warehouse).as_of(today());

        let validation = analyzer.validate_inventory_constraints();
        assert_eq!(validation.high_value_percentage(), 0.0);
        assert_eq!(validation.category_diversity(), 0);

        let stats = analyzer.get_inventory_statistics();
        assert_eq!(stats.total_products(), 0);
        assert_eq!(stats.average_price(), Money::zero());
        assert!(stats.most_expensive_product().is_none());
        assert!(stats.cheapest_product().is_none());

        assert!(analyzer.find_price_outliers(1.5).unwrap().is_empty());
        assert!(analyzer.optimize_shipping_groups(dec!(10)).unwrap().is_empty());
        assert!(analyzer.calculate_weighted_average_price_by_category().unwrap().is_empty());
    }
}
