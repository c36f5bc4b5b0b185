//! # Error Types
//!
//! Domain-specific error types for stockwise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockwise-core errors (this file)                                     │
//! │  ├── CoreError        - Domain failures (not found, overflow)          │
//! │  └── ValidationError  - Malformed inputs to constructors and queries   │
//! │                                                                         │
//! │  stockwise-report errors (binary)                                      │
//! │  └── ConfigError      - Bad configuration values                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (top level)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, field, bounds)
//! 3. Errors are enum variants, never String
//! 4. Queries fail before producing any partial result

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the warehouse.
    ///
    /// ## When This Occurs
    /// - Updating the price of an id that was never added
    /// - Updating the price of a product that was removed
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// An intermediate value no longer fits in the money representation.
    #[error("Arithmetic overflow while computing {operation}")]
    ArithmeticOverflow { operation: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are the "invalid argument" failures: they are raised immediately and
/// no partial result is ever returned alongside them.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Lower bound of a range is above its upper bound.
    #[error("{field} range is inverted: min {min} is greater than max {max}")]
    InvalidRange { field: String, min: String, max: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-finite number, unparsable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
