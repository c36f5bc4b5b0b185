//! # Demo Inventory
//!
//! Fills a warehouse with a fixed, realistic product mix so the report has
//! something to analyze.
//!
//! ## Generated Products
//! - Food across Dairy, Bakery, Produce and Pantry, with expiration dates
//!   spread from yesterday to a few months out
//! - Electronics, some above the 5 kg heavy-shipping line
//! - General merchandise (books, stationery) with no capabilities
//!
//! Dates are offsets from the reference date, so every run yields the same
//! discount tiers and expiring set.

use chrono::{Days, NaiveDate};
use stockwise_core::{CategoryRegistry, Money, Product, ValidationError, Warehouse, Weight};
use tracing::info;

/// (category, name, price in cents, days until expiration, weight in grams)
const FOOD: &[(&str, &str, i64, i64, u32)] = &[
    ("dairy", "Whole Milk 1L", 189, 0, 1_030),
    ("dairy", "Greek Yogurt", 349, 1, 500),
    ("dairy", "Aged Cheddar", 1_250, 21, 400),
    ("dairy", "Butter", 479, 3, 250),
    ("bakery", "Sourdough Loaf", 650, 2, 800),
    ("bakery", "Croissants (4)", 520, -1, 280),
    ("produce", "Bananas", 129, 4, 1_200),
    ("produce", "Strawberries", 499, 1, 450),
    ("pantry", "Basmati Rice 5kg", 1_899, 365, 5_000),
    ("pantry", "Olive Oil 1L", 1_299, 540, 920),
    ("pantry", "Rolled Oats", 449, 180, 1_000),
];

/// (name, price in cents, warranty months, weight in grams)
const ELECTRONICS: &[(&str, i64, u32, u32)] = &[
    ("Laptop Pro 14", 189_900, 24, 1_600),
    ("4K Monitor 27in", 42_900, 36, 6_400),
    ("Wireless Earbuds", 12_900, 12, 60),
    ("Smart Speaker", 9_900, 12, 850),
    ("Espresso Machine", 64_900, 24, 9_200),
    ("USB-C Hub", 4_999, 12, 120),
    ("Gaming Console", 49_900, 12, 4_500),
];

/// (category, name, price in cents)
const GENERAL: &[(&str, &str, i64)] = &[
    ("books", "Rust in Practice", 4_499),
    ("books", "Field Guide to Birds", 2_250),
    ("stationery", "Notebook A5", 899),
    ("stationery", "Fountain Pen", 3_500),
    ("stationery", "Desk Lamp", 2_799),
];

/// Adds the demo products to `warehouse`. Returns how many were added.
pub fn populate(
    warehouse: &mut Warehouse,
    categories: &mut CategoryRegistry,
    today: NaiveDate,
) -> Result<usize, ValidationError> {
    let before = warehouse.len();

    for &(category, name, cents, days, grams) in FOOD {
        let expires = offset(today, days)?;
        let product = Product::food(
            name,
            categories.category(category)?,
            Money::from_cents(cents),
            expires,
            Weight::from_grams(grams)?,
        )?;
        warehouse.add_product(product)?;
    }

    let electronics = categories.category("electronics")?;
    for &(name, cents, warranty, grams) in ELECTRONICS {
        let product = Product::electronics(
            name,
            electronics.clone(),
            Money::from_cents(cents),
            warranty,
            Weight::from_grams(grams)?,
        )?;
        warehouse.add_product(product)?;
    }

    for &(category, name, cents) in GENERAL {
        let product = Product::general(name, categories.category(category)?, Money::from_cents(cents))?;
        warehouse.add_product(product)?;
    }

    let added = warehouse.len() - before;
    info!(warehouse = %warehouse.name(), added, categories = categories.len(), "Seeded demo inventory");
    Ok(added)
}

fn offset(today: NaiveDate, days: i64) -> Result<NaiveDate, ValidationError> {
    let shifted = if days >= 0 {
        today.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| ValidationError::InvalidFormat {
        field: "expiration_date".to_string(),
        reason: format!("{today} shifted by {days} days is out of range"),
    })
}
