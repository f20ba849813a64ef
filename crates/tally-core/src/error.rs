//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Domain errors raised at computation time       │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  tally CLI errors (apps/cli)                                           │
//! │  └── CliError         - Config, file and format failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are retryable. They mean the caller handed the engine a
//! value outside its domain; the editing surface owns the user-facing message.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::TaxMode;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Tax rate percentage outside `[0, 100]`.
    #[error("Invalid tax rate {percentage}%: must be between 0 and 100")]
    InvalidRate { percentage: Decimal },

    /// Negative line quantity.
    ///
    /// ## When This Occurs
    /// - User types `-1` into the quantity field
    /// - An imported document carries a credit line as a negative quantity
    ///
    /// A quantity of exactly zero is valid and contributes nothing.
    #[error("Invalid quantity {quantity}: must not be negative")]
    InvalidQuantity { quantity: Decimal },

    /// Negative unit price on a line.
    #[error("Invalid unit price {price}: must not be negative")]
    InvalidUnitPrice { price: Decimal },

    /// Negative amount handed to the words renderer.
    #[error("Invalid amount {amount}: cannot render a negative amount in words")]
    InvalidAmount { amount: Decimal },

    /// Amount exceeds the largest group label of the numbering system.
    #[error("Amount {amount} is too large to render in words")]
    AmountTooLarge { amount: Decimal },

    /// A line or total does not fit in the decimal range.
    ///
    /// Raised instead of panicking when quantity × price or a running sum
    /// exceeds about 7.9 × 10^28.
    #[error("Amount overflow while computing {operation}")]
    AmountOverflow { operation: String },

    /// Draft mutation addressed a line that does not exist.
    #[error("Line {index} not found (invoice has {len} lines)")]
    LineNotFound { index: usize, len: usize },

    /// Price edit through the entry point of the other tax mode.
    ///
    /// ## User Workflow
    /// ```text
    /// Invoice mode: Inclusive
    ///      │
    ///      ▼
    /// edit_exclusive_price(...)   ← base price is derived, read-only
    ///      │
    ///      ▼
    /// TaxModeMismatch { expected: Exclusive, actual: Inclusive }
    /// ```
    #[error("Cannot edit the {expected:?} price while the invoice is {actual:?}")]
    TaxModeMismatch { expected: TaxMode, actual: TaxMode },

    /// Payment amount is invalid.
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for field checks that run before any arithmetic.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidRate {
            percentage: dec!(120),
        };
        assert_eq!(
            err.to_string(),
            "Invalid tax rate 120%: must be between 0 and 100"
        );

        let err = CoreError::InvalidQuantity {
            quantity: dec!(-2),
        };
        assert_eq!(err.to_string(), "Invalid quantity -2: must not be negative");
    }

    #[test]
    fn test_mode_mismatch_message() {
        let err = CoreError::TaxModeMismatch {
            expected: TaxMode::Exclusive,
            actual: TaxMode::Inclusive,
        };
        assert_eq!(
            err.to_string(),
            "Cannot edit the Exclusive price while the invoice is Inclusive"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "description".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
