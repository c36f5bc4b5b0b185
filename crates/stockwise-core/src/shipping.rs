//! # Shipping Groups
//!
//! Splits shippable products into groups whose total weight stays within a
//! limit, using first-fit decreasing.
//!
//! ## First-Fit Decreasing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  max = 10.00 kg      items (sorted heaviest first): 6, 5, 4, 3, 2       │
//! │                                                                         │
//! │  6 → no bins yet           → open bin A   A = [6]        (6.00)        │
//! │  5 → A: 6+5 = 11 > 10      → open bin B   B = [5]        (5.00)        │
//! │  4 → A: 6+4 = 10 ≤ 10      → bin A        A = [6, 4]     (10.00)       │
//! │  3 → A full, B: 5+3 = 8    → bin B        B = [5, 3]     (8.00)        │
//! │  2 → A full, B: 8+2 = 10   → bin B        B = [5, 3, 2]  (10.00)       │
//! │                                                                         │
//! │  Bins are never rebalanced: this is a fast approximation, not an       │
//! │  optimal packing.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Weights and the limit are compared after rounding to two decimals
//! (half-up). Items of equal weight keep their original relative order.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::Money;
use crate::product::Product;
use crate::weight::round_kg;

// =============================================================================
// Shipping Group
// =============================================================================

/// One shipment: shippable products plus their combined weight and cost.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingGroup<'a> {
    products: Vec<&'a Product>,
    total_weight: Decimal,
    total_shipping_cost: Money,
}

impl<'a> ShippingGroup<'a> {
    /// Builds a group; products without the shippable capability are
    /// skipped, so callers only ever pass shippable products.
    pub(crate) fn new(products: Vec<&'a Product>) -> Self {
        let products: Vec<&'a Product> = products.into_iter().filter(|p| p.is_shippable()).collect();
        let (total_weight, total_shipping_cost) = products
            .iter()
            .filter_map(|p| p.as_shippable())
            .fold((Decimal::ZERO, Money::zero()), |(weight, cost), s| {
                (weight + s.weight().kg(), cost + s.calculate_shipping_cost())
            });

        ShippingGroup {
            products,
            total_weight,
            total_shipping_cost,
        }
    }

    /// The products in this group, in packing order.
    pub fn products(&self) -> &[&'a Product] {
        &self.products
    }

    /// Sum of the item weights in kilograms.
    pub fn total_weight(&self) -> Decimal {
        self.total_weight
    }

    /// Sum of the item shipping costs.
    pub fn total_shipping_cost(&self) -> Money {
        self.total_shipping_cost
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Packing
// =============================================================================

struct Bin<T> {
    items: Vec<T>,
    load: Decimal,
}

/// Packs items into bins with first-fit decreasing.
///
/// `weight_of` gives each item's weight; it is called once per item. Every
/// item ends up in exactly one bin. An item joins a bin when the bin's
/// rounded load plus the item's rounded weight is at most the rounded
/// `max_weight`; an item heavier than `max_weight` gets a bin of its own.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use stockwise_core::shipping::first_fit_decreasing;
///
/// let weights = [2, 6, 3, 5, 4].map(Decimal::from);
/// let bins = first_fit_decreasing(weights.to_vec(), |w| *w, Decimal::from(10));
///
/// assert_eq!(bins.len(), 2);
/// assert_eq!(bins[0], [6, 4].map(Decimal::from).to_vec());
/// assert_eq!(bins[1], [5, 3, 2].map(Decimal::from).to_vec());
/// ```
pub fn first_fit_decreasing<T, F>(items: Vec<T>, weight_of: F, max_weight: Decimal) -> Vec<Vec<T>>
where
    F: Fn(&T) -> Decimal,
{
    let max_weight = round_kg(max_weight);

    let mut weighted: Vec<(Decimal, T)> = items
        .into_iter()
        .map(|item| (weight_of(&item), item))
        .collect();
    // sort_by is stable: equal weights keep their input order
    weighted.sort_by(|a, b| b.0.cmp(&a.0));

    let mut bins: Vec<Bin<T>> = Vec::new();
    for (weight, item) in weighted {
        let rounded = round_kg(weight);
        match bins
            .iter_mut()
            .find(|bin| round_kg(bin.load) + rounded <= max_weight)
        {
            Some(bin) => {
                bin.load += weight;
                bin.items.push(item);
            }
            None => bins.push(Bin {
                items: vec![item],
                load: weight,
            }),
        }
    }

    bins.into_iter().map(|bin| bin.items).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
