//! # Weight Module
//!
//! Shipping weights in kilograms, stored as exact decimals.
//!
//! Weights are compared after rounding to two decimal places (half-up) when
//! packing shipping groups.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// A strictly positive weight in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Weight(Decimal);

impl Weight {
    /// Creates a weight from kilograms.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use stockwise_core::weight::Weight;
    ///
    /// let w = Weight::from_kg(Decimal::new(125, 2)).unwrap(); // 1.25 kg
    /// assert_eq!(w.to_string(), "1.25");
    ///
    /// assert!(Weight::from_kg(Decimal::ZERO).is_err());
    /// ```
    pub fn from_kg(kg: Decimal) -> ValidationResult<Self> {
        if kg <= Decimal::ZERO {
            return Err(ValidationError::MustBePositive {
                field: "weight".to_string(),
            });
        }
        Ok(Weight(kg))
    }

    /// Creates a weight from grams.
    pub fn from_grams(grams: u32) -> ValidationResult<Self> {
        Weight::from_kg(Decimal::new(grams as i64, 3))
    }

    /// Returns the weight in kilograms.
    #[inline]
    pub fn kg(&self) -> Decimal {
        self.0
    }
}

/// Rounds a kilogram amount to two decimals, half-up.
pub(crate) fn round_kg(kg: Decimal) -> Decimal {
    kg.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl TryFrom<Decimal> for Weight {
    type Error = ValidationError;

    fn try_from(kg: Decimal) -> Result<Self, Self::Error> {
        Weight::from_kg(kg)
    }
}

impl From<Weight> for Decimal {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_weight_must_be_positive() {
        assert!(Weight::from_kg(dec!(0.01)).is_ok());
        assert!(matches!(
            Weight::from_kg(dec!(0)),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(Weight::from_kg(dec!(-1.5)).is_err());
    }

    #[test]
    fn test_from_grams() {
        assert_eq!(Weight::from_grams(1250).unwrap().kg(), dec!(1.250));
        assert!(Weight::from_grams(0).is_err());
    }

    #[test]
    fn test_round_kg_half_up() {
        assert_eq!(round_kg(dec!(1.005)), dec!(1.01));
        assert_eq!(round_kg(dec!(1.004)), dec!(1.00));
        assert_eq!(round_kg(dec!(2.5)), dec!(2.50));
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Weight>("\"0\"").is_err());
        let w: Weight = serde_json::from_str("\"4.20\"").unwrap();
        assert_eq!(w.kg(), dec!(4.20));
    }
}
