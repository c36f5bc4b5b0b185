//! Property tests for shipping-group packing and percentiles.

use std::collections::HashSet;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use stockwise_core::shipping::first_fit_decreasing;
use stockwise_core::stats::percentile;
use stockwise_core::{CategoryRegistry, Money, Product, Warehouse, WarehouseAnalyzer, Weight};

/// Weights in whole hundredths of a kilogram, 0.01 to `max_cents`.
fn weights(max_cents: i64) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1..=max_cents, 0..40)
        .prop_map(|cents| cents.into_iter().map(|c| Decimal::new(c, 2)).collect())
}

/// Weights in thousandths of a kilogram, 0.001 to `max_milli`.
fn fine_weights(max_milli: i64) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1..=max_milli, 0..40)
        .prop_map(|milli| milli.into_iter().map(|m| Decimal::new(m, 3)).collect())
}

fn to_hundredths(kg: Decimal) -> Decimal {
    kg.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

proptest! {
    #[test]
    fn bins_never_exceed_capacity(items in weights(1_000), max_cents in 1_000i64..5_000) {
        let max = Decimal::new(max_cents, 2);
        let bins = first_fit_decreasing(items, |w| *w, max);

        for bin in &bins {
            prop_assert!(!bin.is_empty());
            prop_assert!(bin.iter().copied().sum::<Decimal>() <= max);
        }
    }

    #[test]
    fn fine_weights_stay_within_a_hundredth_of_capacity(
        items in fine_weights(15_000),
        max_milli in 1_000i64..20_000,
    ) {
        let max = Decimal::new(max_milli, 3);
        let limit = to_hundredths(max);
        let count = items.len();
        let bins = first_fit_decreasing(items, |w| *w, max);

        prop_assert_eq!(bins.iter().map(Vec::len).sum::<usize>(), count);
        for bin in &bins {
            prop_assert!(!bin.is_empty());
            if bin.iter().any(|w| to_hundredths(*w) > limit) {
                prop_assert_eq!(bin.len(), 1);
            } else {
                prop_assert!(bin.iter().copied().sum::<Decimal>() < limit + Decimal::new(1, 2));
            }
        }
    }

    #[test]
    fn every_item_lands_in_exactly_one_bin(items in weights(1_000)) {
        let labelled: Vec<(usize, Decimal)> = items.iter().copied().enumerate().collect();
        let bins = first_fit_decreasing(labelled, |(_, w)| *w, Decimal::new(1_000, 2));

        let packed: Vec<usize> = bins.iter().flatten().map(|(i, _)| *i).collect();
        let unique: HashSet<usize> = packed.iter().copied().collect();
        prop_assert_eq!(packed.len(), items.len());
        prop_assert_eq!(unique, (0..items.len()).collect::<HashSet<_>>());
    }

    #[test]
    fn later_items_never_fit_the_first_bin(items in weights(600)) {
        let max = Decimal::new(1_000, 2);
        let bins = first_fit_decreasing(items, |w| *w, max);

        // Any item of a later bin did not fit into the earlier bins when it
        // was placed, so the first bin's free space is smaller than the
        // lightest item of every later bin.
        if let Some((first, rest)) = bins.split_first() {
            let free = max - first.iter().copied().sum::<Decimal>();
            for bin in rest {
                let lightest = bin.iter().copied().min().unwrap();
                prop_assert!(lightest > free);
            }
        }
    }

    #[test]
    fn analyzer_groups_cover_all_shippables(items in weights(500)) {
        let mut categories = CategoryRegistry::new();
        let category = categories.category("electronics").unwrap();
        let mut warehouse = Warehouse::new("props");
        for (i, kg) in items.iter().enumerate() {
            let product = Product::electronics(
                format!("Item {i}"),
                category.clone(),
                Money::from_cents(1_000),
                12,
                Weight::from_kg(*kg).unwrap(),
            )
            .unwrap();
            warehouse.add_product(product).unwrap();
        }

        let analyzer = WarehouseAnalyzer::new(&warehouse)
            .as_of(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        let groups = analyzer.optimize_shipping_groups(Decimal::new(1_000, 2)).unwrap();

        let packed: usize = groups.iter().map(|g| g.len()).sum();
        prop_assert_eq!(packed, items.len());
        for group in &groups {
            prop_assert!(group.total_weight() <= Decimal::new(1_000, 2));
            prop_assert_eq!(group.total_shipping_cost(), Money::from_cents(7_900 * group.len() as i64));
        }
    }

    #[test]
    fn percentile_stays_within_data(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..50),
        p in 0.0f64..=100.0,
    ) {
        let result = percentile(&values, p).unwrap().unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(result >= min - 1e-6 && result <= max + 1e-6);
    }
}
