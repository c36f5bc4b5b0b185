//! # Statistics
//!
//! Percentiles and interquartile-range fences used for price outlier
//! detection.
//!
//! ## Linear-Interpolation Percentile
//! ```text
//! sorted = [10, 20, 30, 40]          n = 4
//! p = 25  →  index = 0.25 × (4 − 1) = 0.75
//!            lower = sorted[0] = 10, upper = sorted[1] = 20
//!            result = 10 + (20 − 10) × 0.75 = 17.5
//!
//! Integral index → the element itself, no interpolation.
//! ```

use serde::Serialize;

use crate::validation::{validate_percentile, validate_threshold, ValidationResult};

/// Percentile `p` (0–100) of already sorted values.
///
/// Returns `None` for an empty slice or a NaN `p`. Any other `p` is clamped
/// into 0–100; use [`percentile`] for validated input.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || p.is_nan() {
        return None;
    }

    let index = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        return Some(sorted[lower]);
    }

    let fraction = index - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Percentile `p` (0–100) of unsorted values.
///
/// ## Example
/// ```rust
/// use stockwise_core::stats::percentile;
///
/// let values = [40.0, 10.0, 30.0, 20.0];
/// assert_eq!(percentile(&values, 25.0).unwrap(), Some(17.5));
/// assert_eq!(percentile(&values, 100.0).unwrap(), Some(40.0));
/// assert_eq!(percentile(&[], 50.0).unwrap(), None);
/// assert!(percentile(&values, 101.0).is_err());
/// ```
pub fn percentile(values: &[f64], p: f64) -> ValidationResult<Option<f64>> {
    validate_percentile(p)?;
    Ok(percentile_sorted(&sorted_copy(values), p))
}

/// First and third quartiles of a data set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Computes Q1 and Q3; `None` for an empty data set.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(values);
        Some(Quartiles {
            q1: percentile_sorted(&sorted, 25.0)?,
            q3: percentile_sorted(&sorted, 75.0)?,
        })
    }

    /// Interquartile range, Q3 − Q1.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Fences at `threshold` IQRs beyond the quartiles.
    pub fn fences(&self, threshold: f64) -> ValidationResult<OutlierFences> {
        validate_threshold("outlier threshold", threshold)?;
        let spread = threshold * self.iqr();
        Ok(OutlierFences {
            lower: self.q1 - spread,
            upper: self.q3 + spread,
        })
    }
}

/// Values strictly outside `[lower, upper]` are outliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierFences {
    pub lower: f64,
    pub upper: f64,
}

impl OutlierFences {
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}
