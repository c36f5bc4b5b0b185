//! # Stockwise Report
//!
//! Loads a demo inventory and prints a JSON analysis of it.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         stockwise-report                                │
//! │                                                                         │
//! │  ReportConfig ──► WarehouseRegistry ──► WarehouseAnalyzer ──► stdout   │
//! │  (TOML + env)     + CategoryRegistry     (stockwise-core)     (JSON)   │
//! │                                                                         │
//! │  tracing ──► stderr (RUST_LOG, default "info")                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! stockwise-report
//! STOCKWISE_AS_OF=2026-10-17 STOCKWISE_SEARCH_TERM=milk stockwise-report
//! STOCKWISE_CONFIG=./stockwise.toml RUST_LOG=debug stockwise-report
//! ```

mod config;
mod seed;

use std::collections::BTreeMap;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use stockwise_core::{
    CategoryRegistry, InventoryStatistics, InventoryValidation, Money, Product, ShippingGroup,
    WarehouseAnalyzer, WarehouseRegistry,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ReportConfig;

// =============================================================================
// Report Shape
// =============================================================================

#[derive(Debug, Serialize)]
struct PriceRangeSection<'a> {
    min: Money,
    max: Money,
    products: Vec<&'a Product>,
}

#[derive(Debug, Serialize)]
struct DiscountLine<'a> {
    product: &'a str,
    price: Money,
    discounted: Money,
}

#[derive(Debug, Serialize)]
struct ShippingSection<'a> {
    max_group_weight_kg: Decimal,
    groups: Vec<ShippingGroup<'a>>,
}

#[derive(Debug, Serialize)]
struct InventoryReport<'a> {
    warehouse: &'a str,
    as_of: NaiveDate,
    price_range: PriceRangeSection<'a>,
    expiring_within_days: u32,
    expiring_soon: Vec<&'a Product>,
    search_term: &'a str,
    search_results: Vec<&'a Product>,
    above_high_value_threshold: Vec<&'a Product>,
    weighted_average_price_by_category: BTreeMap<String, Money>,
    price_outliers: Vec<&'a Product>,
    shipping: ShippingSection<'a>,
    discounts: Vec<DiscountLine<'a>>,
    validation: InventoryValidation,
    statistics: InventoryStatistics<'a>,
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Stockwise report...");

    let config = ReportConfig::load().context("loading report configuration")?;
    let today = config.as_of.unwrap_or_else(|| Utc::now().date_naive());
    info!(
        warehouse = %config.warehouse_name,
        %today,
        max_group_weight_kg = %config.max_group_weight_kg,
        "Configuration loaded"
    );

    let mut categories = CategoryRegistry::new();
    let mut warehouses = WarehouseRegistry::new();
    let warehouse = warehouses.get_or_create(&config.warehouse_name);
    seed::populate(warehouse, &mut categories, today).context("seeding demo inventory")?;

    let warehouse = warehouses
        .get(&config.warehouse_name)
        .context("warehouse vanished after seeding")?;
    let analyzer = WarehouseAnalyzer::new(warehouse)
        .with_config(config.analyzer.clone())?
        .as_of(today);

    let report = build_report(&analyzer, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!(
        products = report.statistics.total_products(),
        expiring = report.expiring_soon.len(),
        outliers = report.price_outliers.len(),
        "Report complete"
    );
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Set `RUST_LOG=debug` for the per-query events from stockwise-core
/// - Default: INFO level
///
/// Logs go to stderr; stdout carries only the JSON report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn build_report<'a>(
    analyzer: &WarehouseAnalyzer<'a>,
    config: &'a ReportConfig,
) -> anyhow::Result<InventoryReport<'a>> {
    let warehouse = analyzer.warehouse();

    let price_range = PriceRangeSection {
        min: config.price_range_min,
        max: config.price_range_max,
        products: analyzer.find_products_in_price_range(config.price_range_min, config.price_range_max)?,
    };

    let weighted_average_price_by_category = analyzer
        .calculate_weighted_average_price_by_category()?
        .into_iter()
        .map(|(category, average)| (category.name().to_string(), average))
        .collect();

    let shipping = ShippingSection {
        max_group_weight_kg: config.max_group_weight_kg,
        groups: analyzer.optimize_shipping_groups(config.max_group_weight_kg)?,
    };

    let discounted = analyzer.calculate_expiration_based_discounts();
    let discounts = warehouse
        .iter()
        .filter_map(|p| {
            let price = *discounted.get(&p.id())?;
            (price != p.price()).then(|| DiscountLine {
                product: p.name(),
                price: p.price(),
                discounted: price,
            })
        })
        .collect();

    let validation = analyzer.validate_inventory_constraints();
    if validation.is_high_value_warning() {
        warn!(
            percentage = validation.high_value_percentage(),
            "High-value products dominate the inventory"
        );
    }
    if !validation.has_minimum_diversity() {
        warn!(
            categories = validation.category_diversity(),
            "Inventory lacks category diversity"
        );
    }

    Ok(InventoryReport {
        warehouse: warehouse.name(),
        as_of: analyzer.today(),
        price_range,
        expiring_within_days: config.expiring_within_days,
        expiring_soon: analyzer.find_products_expiring_within_days(config.expiring_within_days),
        search_term: &config.search_term,
        search_results: analyzer.search_products_by_name(&config.search_term),
        above_high_value_threshold: analyzer
            .find_products_above_price(analyzer.config().high_value_threshold),
        weighted_average_price_by_category,
        price_outliers: analyzer.find_price_outliers_default()?,
        shipping,
        discounts,
        validation,
        statistics: analyzer.get_inventory_statistics(),
    })
}
