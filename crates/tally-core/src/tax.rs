//! # Tax Mode Resolution
//!
//! Splits an entered unit price into base price and tax according to the
//! invoice tax mode.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unit_price = 118, rate = 18%                                           │
//! │                                                                         │
//! │  EXCLUSIVE (price is pre-tax)        INCLUSIVE (price contains tax)     │
//! │  ─────────────────────────────       ───────────────────────────────    │
//! │  base = 118                          base = 118 / 1.18 = 100            │
//! │  tax  = 118 × 0.18 = 21.24           tax  = 118 − 100  = 18             │
//! │                                                                         │
//! │  rate = 0% or no rate selected ──► base = unit_price, tax = 0           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is rounded here. Rounding happens once, at display time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{TaxMode, TaxRate};

/// Per-unit split of an entered price.
///
/// `base + tax` always equals the tax-inclusive unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxSplit {
    pub base: Money,
    pub tax: Money,
}

impl TaxSplit {
    /// Splits `unit_price` with an already validated rate.
    pub fn resolve(unit_price: Money, rate: TaxRate, mode: TaxMode) -> Self {
        if rate.is_zero() {
            return TaxSplit {
                base: unit_price,
                tax: Money::zero(),
            };
        }

        match mode {
            TaxMode::Inclusive => {
                let base = Money::new(unit_price.amount() / (Decimal::ONE + rate.fraction()));
                TaxSplit {
                    base,
                    tax: unit_price - base,
                }
            }
            TaxMode::Exclusive => TaxSplit {
                base: unit_price,
                tax: unit_price * rate.fraction(),
            },
        }
    }

    /// The tax-inclusive unit price.
    #[inline]
    pub fn gross(&self) -> Money {
        self.base + self.tax
    }
}

/// Splits `unit_price` for a raw percentage.
///
/// ## Errors
/// [`CoreError::InvalidRate`](crate::CoreError::InvalidRate) if
/// `rate_percentage` is outside `[0, 100]`. `None` means no rate selected
/// and resolves as 0%.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tally_core::{resolve_tax, Money, TaxMode};
///
/// let split = resolve_tax(Money::new(Decimal::from(118)), Some(Decimal::from(18)), TaxMode::Inclusive).unwrap();
/// assert_eq!(split.base, Money::new(Decimal::from(100)));
/// assert_eq!(split.tax, Money::new(Decimal::from(18)));
/// ```
pub fn resolve_tax(
    unit_price: Money,
    rate_percentage: Option<Decimal>,
    mode: TaxMode,
) -> CoreResult<TaxSplit> {
    let rate = match rate_percentage {
        Some(percentage) => TaxRate::from_percentage(percentage)?,
        None => TaxRate::zero(),
    };
    Ok(TaxSplit::resolve(unit_price, rate, mode))
}
