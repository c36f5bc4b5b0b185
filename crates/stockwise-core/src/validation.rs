//! # Validation Module
//!
//! Input validation utilities shared by the product model and the analyzer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Construction (Product, Weight, Category)                     │
//! │  ├── Names present, prices non-negative, weights positive              │
//! │  └── Invalid values never enter the warehouse                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Analyzer queries                                             │
//! │  ├── Ranges ordered (min <= max)                                       │
//! │  └── Thresholds finite, percentiles within 0..=100                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockwise_core::money::Money;
//! use stockwise_core::validation::{validate_price, validate_price_range};
//!
//! assert!(validate_price(Money::from_cents(1099)).is_ok());
//! assert!(validate_price_range(Money::from_cents(2000), Money::from_cents(1000)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product or category name.
pub const MAX_NAME_LENGTH: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use stockwise_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Organic Milk 1L").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a category name before normalization.
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    validate_name("category", name)
}

fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: Money::zero().to_string(),
            max: Money::from_cents(i64::MAX).to_string(),
        });
    }

    Ok(())
}

/// Validates an inclusive price range.
pub fn validate_price_range(min: Money, max: Money) -> ValidationResult<()> {
    if min > max {
        return Err(ValidationError::InvalidRange {
            field: "price".to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }

    Ok(())
}

/// Validates a multiplier such as the IQR outlier threshold.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative
pub fn validate_threshold(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "inf".to_string(),
        });
    }

    Ok(())
}

/// Validates a percentile rank (0-100 inclusive).
pub fn validate_percentile(p: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&p) {
        return Err(ValidationError::OutOfRange {
            field: "percentile".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

/// Validates a shipping-group capacity in kilograms.
pub fn validate_max_weight(kg: Decimal) -> ValidationResult<()> {
    if kg <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "max weight".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Whole Milk").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_category_name() {
        assert!(validate_category_name("dairy").is_ok());
        assert!(matches!(
            validate_category_name("  "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_price_range() {
        let ten = Money::from_cents(1000);
        let twenty = Money::from_cents(2000);
        assert!(validate_price_range(ten, twenty).is_ok());
        assert!(validate_price_range(ten, ten).is_ok());
        assert!(matches!(
            validate_price_range(twenty, ten),
            Err(ValidationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold("threshold", 1.5).is_ok());
        assert!(validate_threshold("threshold", 0.0).is_ok());
        assert!(validate_threshold("threshold", -0.1).is_err());
        assert!(validate_threshold("threshold", f64::NAN).is_err());
        assert!(validate_threshold("threshold", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_percentile() {
        assert!(validate_percentile(0.0).is_ok());
        assert!(validate_percentile(100.0).is_ok());
        assert!(validate_percentile(100.5).is_err());
        assert!(validate_percentile(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_max_weight() {
        assert!(validate_max_weight(Decimal::new(10, 0)).is_ok());
        assert!(validate_max_weight(Decimal::ZERO).is_err());
        assert!(validate_max_weight(Decimal::new(-1, 0)).is_err());
    }
}
