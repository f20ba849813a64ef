//! # Invoice Aggregation
//!
//! Sums line amounts into invoice totals.
//!
//! ## Rounding Point
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line 1: line_base, line_tax   (unrounded)                              │
//! │  line 2: line_base, line_tax   (unrounded)                              │
//! │  ...                                                                    │
//! │     │                                                                   │
//! │     ▼  Σ, no rounding                                                   │
//! │  subtotal, tax_total                                                    │
//! │     │                                                                   │
//! │     ▼  round ONCE                                                       │
//! │  grand_total = round2(subtotal + tax_total)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are recomputed from scratch on every call. No partial sums survive
//! between calls, so adding, editing or removing a line can never leave a
//! stale total behind.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::line::LineAmounts;
use crate::money::Money;
use crate::types::{LineItem, TaxMode};

/// Invoice-level totals.
///
/// `subtotal` and `tax_total` are unrounded sums; `grand_total` is their sum
/// rounded to two places. On this raw value `subtotal + tax_total` equals
/// `grand_total` only before rounding, so show and persist
/// [`InvoiceTotals::rounded`], whose three figures add up exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub tax_total: Money,
    pub grand_total: Money,
}

impl InvoiceTotals {
    /// Display view in which the printed figures always add up.
    ///
    /// The grand total is already rounded. The subtotal is rounded on its
    /// own, and the shown tax is the difference, so
    /// `subtotal + tax_total == grand_total` holds on paper.
    pub fn rounded(&self) -> InvoiceTotals {
        let subtotal = self.subtotal.round_display();
        InvoiceTotals {
            subtotal,
            tax_total: self.grand_total - subtotal,
            grand_total: self.grand_total,
        }
    }

    /// True when there is nothing to pay.
    pub fn is_zero(&self) -> bool {
        self.grand_total.is_zero()
    }
}

/// Aggregates computed lines into invoice totals.
///
/// Line order does not affect the result. An empty slice yields all zeros.
///
/// ## Errors
/// [`CoreError::AmountOverflow`] if a sum leaves the decimal range.
///
/// ## Example
/// ```rust
/// use tally_core::aggregate;
///
/// let totals = aggregate(&[]).unwrap();
/// assert!(totals.subtotal.is_zero());
/// assert!(totals.tax_total.is_zero());
/// assert!(totals.grand_total.is_zero());
/// ```
pub fn aggregate(lines: &[LineAmounts]) -> CoreResult<InvoiceTotals> {
    let subtotal = checked_sum(lines.iter().map(|l| l.line_base))?;
    let tax_total = checked_sum(lines.iter().map(|l| l.line_tax))?;
    let grand_total = subtotal.checked_add(tax_total).ok_or_else(overflow)?;

    Ok(InvoiceTotals {
        subtotal,
        tax_total,
        grand_total: grand_total.round_display(),
    })
}

fn checked_sum(mut values: impl Iterator<Item = Money>) -> CoreResult<Money> {
    values.try_fold(Money::zero(), |acc, value| acc.checked_add(value).ok_or_else(overflow))
}

fn overflow() -> CoreError {
    CoreError::AmountOverflow {
        operation: "invoice totals".to_string(),
    }
}

/// Computes every line against the catalog, then aggregates.
///
/// Fails on the first invalid line; no partial totals are returned.
pub fn compute_totals(
    items: &[LineItem],
    catalog: &Catalog,
    mode: TaxMode,
) -> CoreResult<InvoiceTotals> {
    let lines = items
        .iter()
        .map(|item| item.amounts(catalog, mode))
        .collect::<CoreResult<Vec<_>>>()?;

    let totals = aggregate(&lines)?;
    debug!(
        lines = lines.len(),
        %mode,
        grand_total = %totals.grand_total,
        "Invoice totals recomputed"
    );
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{TaxRate, TaxRateEntry};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn catalog() -> Catalog {
        Catalog::new(
            Vec::new(),
            vec![
                TaxRateEntry {
                    id: "gst-18".to_string(),
                    name: "GST 18%".to_string(),
                    percentage: TaxRate::from_percentage(dec!(18)).unwrap(),
                },
                TaxRateEntry {
                    id: "vat-825".to_string(),
                    name: "VAT 8.25%".to_string(),
                    percentage: TaxRate::from_bps(825).unwrap(),
                },
            ],
        )
    }

    fn widget(quantity: Decimal) -> LineItem {
        LineItem::new("Widget", quantity, Money::new(dec!(118))).with_tax_rate("gst-18")
    }

    #[test]
    fn test_empty_invoice_is_zero() {
        let totals = compute_totals(&[], &catalog(), TaxMode::Inclusive).unwrap();
        assert_eq!(totals, InvoiceTotals::default());
        assert!(totals.is_zero());
    }

    #[test]
    fn test_two_line_grand_total() {
        let catalog = catalog();
        let inclusive = widget(dec!(2)).amounts(&catalog, TaxMode::Inclusive).unwrap();
        let exclusive = widget(dec!(2)).amounts(&catalog, TaxMode::Exclusive).unwrap();
        assert_eq!(inclusive.line_total.amount(), dec!(236));
        assert_eq!(exclusive.line_total.amount(), dec!(278.48));

        let totals = aggregate(&[inclusive, exclusive]).unwrap();
        assert_eq!(totals.subtotal.amount(), dec!(436));
        assert_eq!(totals.tax_total.amount(), dec!(78.48));
        assert_eq!(totals.grand_total.amount(), dec!(514.48));
    }

    #[test]
    fn test_zero_quantity_line_contributes_nothing() {
        let catalog = catalog();
        let with_zero = compute_totals(
            &[widget(dec!(1)), widget(dec!(0))],
            &catalog,
            TaxMode::Exclusive,
        )
        .unwrap();
        let without = compute_totals(&[widget(dec!(1))], &catalog, TaxMode::Exclusive).unwrap();
        assert_eq!(with_zero, without);
    }

    #[test]
    fn test_grand_total_rounded_once() {
        // Three inclusive lines of 10.00 at 8.25%: each base is 9.2378...,
        // rounding each first would print 27.72 + 2.28.
        let catalog = catalog();
        let items: Vec<LineItem> = (0..3)
            .map(|_| LineItem::new("Tea", dec!(1), Money::new(dec!(10))).with_tax_rate("vat-825"))
            .collect();

        let totals = compute_totals(&items, &catalog, TaxMode::Inclusive).unwrap();
        assert_eq!(totals.grand_total.amount(), dec!(30.00));
        assert!(totals.subtotal.amount().scale() > 2);

        let shown = totals.rounded();
        assert_eq!(shown.subtotal.amount(), dec!(27.71));
        assert_eq!(shown.tax_total.amount(), dec!(2.29));
        assert_eq!(shown.subtotal + shown.tax_total, shown.grand_total);
    }

    #[test]
    fn test_invalid_line_fails_whole_computation() {
        let items = vec![widget(dec!(1)), widget(dec!(-1))];
        assert!(compute_totals(&items, &catalog(), TaxMode::Exclusive).is_err());
    }

    #[test]
    fn test_order_does_not_matter() {
        let catalog = catalog();
        let a = LineItem::new("A", dec!(3), Money::new(dec!(19.99))).with_tax_rate("vat-825");
        let b = widget(dec!(2));

        let forward = compute_totals(&[a.clone(), b.clone()], &catalog, TaxMode::Inclusive).unwrap();
        let backward = compute_totals(&[b, a], &catalog, TaxMode::Inclusive).unwrap();
        assert_eq!(forward.grand_total, backward.grand_total);
    }

    #[test]
    fn test_sum_overflow_is_an_error() {
        let big = Money::new(dec!(50000000000000000000000000000));
        let line = LineAmounts {
            base_price: big,
            tax_amount: Money::zero(),
            line_base: big,
            line_tax: Money::zero(),
            line_total: big,
        };

        let err = aggregate(&[line, line]).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
    }

    #[test]
    fn test_oversized_draft_line_reports_overflow() {
        let items = vec![LineItem::new(
            "Bulk",
            dec!(10000000000),
            Money::new(dec!(100000000000000000000)),
        )];
        assert!(matches!(
            compute_totals(&items, &Catalog::default(), TaxMode::Inclusive),
            Err(CoreError::AmountOverflow { .. })
        ));
    }

    fn arb_line() -> impl Strategy<Value = LineItem> {
        (0i64..=10_000_000, 0i64..=10_000, prop::bool::ANY).prop_map(|(cents, qty_hundredths, taxed)| {
            let item = LineItem::new(
                "Generated",
                Decimal::new(qty_hundredths, 2),
                Money::from_cents(cents),
            );
            if taxed {
                item.with_tax_rate("vat-825")
            } else {
                item
            }
        })
    }

    proptest! {
        #[test]
        fn prop_recompute_is_idempotent(items in prop::collection::vec(arb_line(), 0..20), inclusive in prop::bool::ANY) {
            let catalog = catalog();
            let mode = TaxMode::from_inclusive_flag(inclusive);
            let first = compute_totals(&items, &catalog, mode).unwrap();
            let second = compute_totals(&items, &catalog, mode).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_grand_total_is_sum_of_parts(items in prop::collection::vec(arb_line(), 1..20), inclusive in prop::bool::ANY) {
            let totals = compute_totals(&items, &catalog(), TaxMode::from_inclusive_flag(inclusive)).unwrap();
            prop_assert_eq!(totals.grand_total, (totals.subtotal + totals.tax_total).round_display());

            let shown = totals.rounded();
            prop_assert_eq!(shown.subtotal + shown.tax_total, shown.grand_total);
        }
    }
}
