//! # Money Module
//!
//! Provides the `Money` type for handling product prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Averages over an inventory:                                            │
//! │    1590.50 / 4 = 397.625 → must round to 397.63 (half-up)              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    159050 cents / 4 → 39762.5 → 39763 cents                            │
//! │    Every rounding step is explicit and happens exactly once            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Every "round to two decimals" in this crate is **half away from zero**
//! on whole cents. For the non-negative prices a warehouse holds this is
//! the classic half-up rule.
//!
//! ## Usage
//! ```rust
//! use stockwise_core::money::Money;
//!
//! let price = Money::from_cents(10000); // $100.00
//! let discounted = price.scale_bps(8500); // 85% of the price
//! assert_eq!(discounted.cents(), 8500);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──┬──► price range / above-price filters                 │
/// │                  ├──► expiration discounts (scale_bps)                  │
/// │                  ├──► weighted averages per category                    │
/// │                  └──► inventory statistics (sum, div_rounded)           │
/// │                                                                         │
/// │  Shippable.calculate_shipping_cost ──► ShippingGroup.total_shipping_cost│
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use stockwise_core::money::Money;
    ///
    /// let price = Money::from_cents(29050); // Represents $290.50
    /// assert_eq!(price.cents(), 29050);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use stockwise_core::money::Money;
    ///
    /// let price = Money::from_major_minor(290, 50);
    /// assert_eq!(price.cents(), 29050);
    ///
    /// let negative = Money::from_major_minor(-5, 50);
    /// assert_eq!(negative.cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a factor in basis points (10000 = 100%) and rounds
    /// half-up to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use stockwise_core::money::Money;
    ///
    /// // $9.99 × 0.85 = $8.4915 → $8.49
    /// assert_eq!(Money::from_cents(999).scale_bps(8500).cents(), 849);
    /// // $0.01 × 0.50 = $0.005 → $0.01
    /// assert_eq!(Money::from_cents(1).scale_bps(5000).cents(), 1);
    /// ```
    pub fn scale_bps(&self, bps: u32) -> Money {
        // i128 keeps cents × bps from overflowing on large prices
        let scaled = div_round_half_away(self.0 as i128 * bps as i128, 10_000);
        Money(scaled as i64)
    }

    /// Divides by a count and rounds half-up to the cent.
    ///
    /// Returns zero when `count` is zero, so averaging an empty set never
    /// panics.
    ///
    /// ## Example
    /// ```rust
    /// use stockwise_core::money::Money;
    ///
    /// let total = Money::from_cents(159050); // $1590.50
    /// assert_eq!(total.div_rounded(4).cents(), 39763); // $397.63
    /// assert_eq!(total.div_rounded(0), Money::zero());
    /// ```
    pub fn div_rounded(&self, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        Money(div_round_half_away(self.0 as i128, count as i128) as i64)
    }

    /// Returns the value in major units as an exact decimal (`290.50`).
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Converts a decimal amount in major units to Money, rounding half-up
    /// to the cent.
    ///
    /// Returns `None` when the amount does not fit in `i64` cents.
    pub fn from_decimal_rounded(amount: Decimal) -> Option<Money> {
        amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Money)
    }

    /// Returns the value in major units as `f64`.
    ///
    /// Only the statistics routines use this; never feed the result back
    /// into Money arithmetic.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Integer division of `n` by a positive `d`, rounding halves away from zero.
fn div_round_half_away(n: i128, d: i128) -> i128 {
    if n >= 0 {
        (2 * n + d) / (2 * d)
    } else {
        -((-2 * n + d) / (2 * d))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
