//! # Line Item Calculation
//!
//! Scales a per-unit [`TaxSplit`] by the line quantity.
//!
//! ```text
//! LineItem { unit_price, quantity, tax_rate_id }
//!      │
//!      │  Catalog::tax_rate(tax_rate_id)      (live, 0% if missing)
//!      ▼
//! TaxSplit::resolve(unit_price, rate, mode)   (per unit, unrounded)
//!      │
//!      ▼
//! calculate_line(item, split)                 ◄── THIS MODULE
//!      │
//!      ├── line_base  = base × quantity
//!      ├── line_tax   = tax  × quantity
//!      └── line_total = line_base + line_tax
//! ```
//!
//! Values stay unrounded so the aggregator can sum them without drift. Use
//! [`LineAmounts::rounded`] for display.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::tax::TaxSplit;
use crate::types::{LineItem, TaxMode};
use crate::validation::{validate_quantity, validate_unit_price};

/// Derived amounts for one line. Recomputed on every read, never stored
/// as a source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineAmounts {
    /// Per-unit pre-tax price. Read-only in inclusive mode.
    pub base_price: Money,
    /// Per-unit tax.
    pub tax_amount: Money,
    /// `base_price × quantity`.
    pub line_base: Money,
    /// `tax_amount × quantity`.
    pub line_tax: Money,
    /// `line_base + line_tax`.
    pub line_total: Money,
}

impl LineAmounts {
    /// Returns a copy rounded to two places for display.
    ///
    /// `line_base` and `line_total` are rounded on their own and the shown
    /// `line_tax` is their difference, so a printed row always adds up.
    /// Per-unit values are rounded independently.
    ///
    /// Never feed the result back into aggregation.
    pub fn rounded(&self) -> LineAmounts {
        let line_base = self.line_base.round_display();
        let line_total = self.line_total.round_display();
        LineAmounts {
            base_price: self.base_price.round_display(),
            tax_amount: self.tax_amount.round_display(),
            line_base,
            line_tax: line_total - line_base,
            line_total,
        }
    }
}

/// Scales a resolved per-unit split by the item's quantity.
///
/// ## Errors
/// - [`CoreError::InvalidQuantity`](crate::CoreError::InvalidQuantity) for a
///   negative quantity
/// - [`CoreError::InvalidUnitPrice`](crate::CoreError::InvalidUnitPrice) for a
///   negative unit price
/// - [`CoreError::AmountOverflow`] when the scaled amounts leave the decimal
///   range
///
/// A zero quantity is valid and yields all-zero line values.
pub fn calculate_line(item: &LineItem, split: TaxSplit) -> CoreResult<LineAmounts> {
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;

    let overflow = || CoreError::AmountOverflow {
        operation: "line amounts".to_string(),
    };

    let line_base = split.base.multiply_quantity(item.quantity).ok_or_else(overflow)?;
    let line_tax = split.tax.multiply_quantity(item.quantity).ok_or_else(overflow)?;
    let line_total = line_base.checked_add(line_tax).ok_or_else(overflow)?;

    Ok(LineAmounts {
        base_price: split.base,
        tax_amount: split.tax,
        line_base,
        line_tax,
        line_total,
    })
}

impl LineItem {
    /// Resolves the line's rate from the catalog and computes its amounts.
    pub fn amounts(&self, catalog: &Catalog, mode: TaxMode) -> CoreResult<LineAmounts> {
        let rate = catalog.tax_rate(self.tax_rate_id.as_deref());
        let split = TaxSplit::resolve(self.unit_price, rate, mode);
        calculate_line(self, split)
    }
}
