//! # Validation Module
//!
//! Input validation for values entering the engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Editing surface                                              │
//! │  └── Immediate user feedback while typing                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization                                              │
//! │  └── TaxRate rejects out-of-range percentages on parse                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE, at the point of computation                     │
//! │  └── quantity, unit price, ids, description                            │
//! │                                                                         │
//! │  Invalid values are rejected, never clamped to a default.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::TaxRate;

/// Result type for field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted line description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must not be negative
/// - Zero is allowed (the line contributes nothing)
/// - Fractions are allowed (1.5 hours)
pub fn validate_quantity(quantity: Decimal) -> CoreResult<()> {
    if quantity < Decimal::ZERO {
        return Err(CoreError::InvalidQuantity { quantity });
    }
    Ok(())
}

/// Validates an entered unit price.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok()); // free item
/// assert!(validate_unit_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> CoreResult<()> {
    if price.is_negative() {
        return Err(CoreError::InvalidUnitPrice {
            price: price.amount(),
        });
    }
    Ok(())
}

/// Validates a tax percentage, returning the typed rate.
pub fn validate_tax_percentage(percentage: Decimal) -> CoreResult<TaxRate> {
    TaxRate::from_percentage(percentage)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a free-text line description.
///
/// ## Rules
/// - May be empty (falls back to the product name)
/// - At most [`MAX_DESCRIPTION_LEN`] characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

/// Validates a UUID string (line ids).
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Validates a payment amount.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_payment_amount(amount: Money) -> CoreResult<()> {
    if !amount.is_positive() {
        return Err(CoreError::InvalidPaymentAmount {
            reason: format!("{} must be greater than zero", amount),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
