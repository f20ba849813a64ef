//! # Invoice Draft
//!
//! The in-memory model an editing session mutates: ordered lines plus the
//! invoice-wide tax mode.
//!
//! ## Mutation Entry Points
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mode        Price the user edits        Entry point                    │
//! │  ─────────   ──────────────────────      ─────────────────────────────  │
//! │  Exclusive   pre-tax unit price          edit_exclusive_price()         │
//! │  Inclusive   tax-inclusive unit price    edit_inclusive_price()         │
//! │                                                                         │
//! │  The base price in inclusive mode is derived. There is no way to set   │
//! │  it directly; calling the other mode's entry point is an error.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads (`line_amounts`, `totals`) recompute everything from the stored
//! inputs. The draft keeps no derived state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::line::LineAmounts;
use crate::money::Money;
use crate::totals::{compute_totals, InvoiceTotals};
use crate::types::{LineItem, TaxMode};
use crate::validation::{
    validate_description, validate_quantity, validate_unit_price, validate_uuid,
};

/// Editable invoice body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    #[serde(default)]
    tax_mode: TaxMode,
    #[serde(default)]
    lines: Vec<LineItem>,
}

impl InvoiceDraft {
    /// Creates an empty draft. Empty drafts are valid and total zero.
    pub fn new(tax_mode: TaxMode) -> Self {
        InvoiceDraft {
            tax_mode,
            lines: Vec::new(),
        }
    }

    /// Restores a draft from stored lines.
    ///
    /// The lines are taken as they are, like a deserialized draft. Invalid
    /// quantities or prices surface as errors from `line_amounts` and
    /// `totals`, never as wrong numbers.
    pub fn with_lines(tax_mode: TaxMode, lines: Vec<LineItem>) -> Self {
        InvoiceDraft { tax_mode, lines }
    }

    pub fn tax_mode(&self) -> TaxMode {
        self.tax_mode
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Switches the invoice between inclusive and exclusive pricing.
    ///
    /// Entered prices are kept as they are; only their meaning changes.
    pub fn set_tax_mode(&mut self, tax_mode: TaxMode) {
        debug!(from = %self.tax_mode, to = %tax_mode, "Invoice tax mode changed");
        self.tax_mode = tax_mode;
    }

    /// Appends a line after validating its inputs. Returns its index.
    ///
    /// The line id must be a UUID.
    pub fn add_line(&mut self, line: LineItem) -> CoreResult<usize> {
        validate_uuid(&line.id)?;
        validate_quantity(line.quantity)?;
        validate_unit_price(line.unit_price)?;
        if let Some(description) = &line.description {
            validate_description(description)?;
        }

        self.lines.push(line);
        Ok(self.lines.len() - 1)
    }

    /// Removes and returns the line at `index`.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<LineItem> {
        self.check_index(index)?;
        Ok(self.lines.remove(index))
    }

    pub fn set_quantity(&mut self, index: usize, quantity: Decimal) -> CoreResult<()> {
        validate_quantity(quantity)?;
        self.line_mut(index)?.quantity = quantity;
        Ok(())
    }

    pub fn set_description(&mut self, index: usize, description: Option<String>) -> CoreResult<()> {
        if let Some(text) = &description {
            validate_description(text)?;
        }
        self.line_mut(index)?.description = description;
        Ok(())
    }

    /// Selects a tax rate reference, or clears it (0%).
    pub fn set_tax_rate(&mut self, index: usize, tax_rate_id: Option<String>) -> CoreResult<()> {
        self.line_mut(index)?.tax_rate_id = tax_rate_id;
        Ok(())
    }

    /// Sets the tax-inclusive unit price. Inclusive invoices only.
    pub fn edit_inclusive_price(&mut self, index: usize, price: Money) -> CoreResult<()> {
        self.edit_price(TaxMode::Inclusive, index, price)
    }

    /// Sets the pre-tax unit price. Exclusive invoices only.
    pub fn edit_exclusive_price(&mut self, index: usize, price: Money) -> CoreResult<()> {
        self.edit_price(TaxMode::Exclusive, index, price)
    }

    fn edit_price(&mut self, expected: TaxMode, index: usize, price: Money) -> CoreResult<()> {
        if self.tax_mode != expected {
            return Err(CoreError::TaxModeMismatch {
                expected,
                actual: self.tax_mode,
            });
        }
        validate_unit_price(price)?;
        self.line_mut(index)?.unit_price = price;
        Ok(())
    }

    /// Amounts for every line, in order.
    pub fn line_amounts(&self, catalog: &Catalog) -> CoreResult<Vec<LineAmounts>> {
        self.lines
            .iter()
            .map(|line| line.amounts(catalog, self.tax_mode))
            .collect()
    }

    /// Invoice totals, recomputed from scratch.
    pub fn totals(&self, catalog: &Catalog) -> CoreResult<InvoiceTotals> {
        compute_totals(&self.lines, catalog, self.tax_mode)
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.lines.len() {
            return Err(CoreError::LineNotFound {
                index,
                len: self.lines.len(),
            });
        }
        Ok(())
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut LineItem> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(CoreError::LineNotFound { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::{TaxRate, TaxRateEntry};
    use rust_decimal_macros::dec;

    fn catalog() -> Catalog {
        Catalog::new(
            Vec::new(),
            vec![TaxRateEntry {
                id: "gst-18".to_string(),
                name: "GST 18%".to_string(),
                percentage: TaxRate::from_percentage(dec!(18)).unwrap(),
            }],
        )
    }

    fn widget() -> LineItem {
        LineItem::new("Widget", dec!(2), Money::new(dec!(118))).with_tax_rate("gst-18")
    }

    #[test]
    fn test_empty_draft_totals_zero() {
        let draft = InvoiceDraft::new(TaxMode::Inclusive);
        assert!(draft.is_empty());
        assert!(draft.totals(&catalog()).unwrap().is_zero());
    }

    #[test]
    fn test_add_and_remove_recomputes() {
        let catalog = catalog();
        let mut draft = InvoiceDraft::new(TaxMode::Inclusive);

        draft.add_line(widget()).unwrap();
        let idx = draft.add_line(widget()).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(draft.totals(&catalog).unwrap().grand_total.amount(), dec!(472));

        draft.remove_line(0).unwrap();
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.totals(&catalog).unwrap().grand_total.amount(), dec!(236));

        draft.remove_line(0).unwrap();
        assert!(draft.totals(&catalog).unwrap().is_zero());
    }

    #[test]
    fn test_mode_switch_changes_meaning_not_input() {
        let catalog = catalog();
        let mut draft = InvoiceDraft::new(TaxMode::Inclusive);
        draft.add_line(widget()).unwrap();
        assert_eq!(draft.totals(&catalog).unwrap().grand_total.amount(), dec!(236));

        draft.set_tax_mode(TaxMode::Exclusive);
        assert_eq!(draft.lines()[0].unit_price.amount(), dec!(118));
        assert_eq!(draft.totals(&catalog).unwrap().grand_total.amount(), dec!(278.48));
    }

    #[test]
    fn test_price_entry_point_per_mode() {
        let mut draft = InvoiceDraft::new(TaxMode::Inclusive);
        draft.add_line(widget()).unwrap();

        draft.edit_inclusive_price(0, Money::new(dec!(236))).unwrap();
        let amounts = draft.line_amounts(&catalog()).unwrap();
        assert_eq!(amounts[0].base_price.amount(), dec!(200));

        let err = draft.edit_exclusive_price(0, Money::new(dec!(100))).unwrap_err();
        assert!(matches!(
            err,
            CoreError::TaxModeMismatch {
                expected: TaxMode::Exclusive,
                actual: TaxMode::Inclusive
            }
        ));
    }

    #[test]
    fn test_invalid_edits_rejected() {
        let mut draft = InvoiceDraft::new(TaxMode::Exclusive);
        draft.add_line(widget()).unwrap();

        assert!(matches!(
            draft.set_quantity(0, dec!(-1)),
            Err(CoreError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            draft.edit_exclusive_price(0, Money::new(dec!(-1))),
            Err(CoreError::InvalidUnitPrice { .. })
        ));
        assert!(matches!(
            draft.set_quantity(5, dec!(1)),
            Err(CoreError::LineNotFound { index: 5, len: 1 })
        ));
        assert!(draft.remove_line(3).is_err());

        // Nothing was clamped or changed
        assert_eq!(draft.lines()[0].quantity, dec!(2));
        assert_eq!(draft.lines()[0].unit_price.amount(), dec!(118));
    }

    #[test]
    fn test_clearing_tax_rate_means_zero() {
        let catalog = catalog();
        let mut draft = InvoiceDraft::new(TaxMode::Exclusive);
        draft.add_line(widget()).unwrap();

        draft.set_tax_rate(0, None).unwrap();
        let totals = draft.totals(&catalog).unwrap();
        assert!(totals.tax_total.is_zero());
        assert_eq!(totals.grand_total.amount(), dec!(236));
    }

    #[test]
    fn test_add_line_requires_uuid_id() {
        let mut draft = InvoiceDraft::new(TaxMode::Exclusive);
        let mut line = widget();
        line.id = "line-1".to_string();

        assert!(matches!(
            draft.add_line(line),
            Err(CoreError::Validation(ValidationError::InvalidFormat { .. }))
        ));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_set_description() {
        let catalog = catalog();
        let mut draft = InvoiceDraft::new(TaxMode::Exclusive);
        draft.add_line(widget()).unwrap();

        draft.set_description(0, Some("Blue widget".to_string())).unwrap();
        assert_eq!(draft.lines()[0].display_description(&catalog), "Blue widget");

        let too_long = "x".repeat(501);
        assert!(matches!(
            draft.set_description(0, Some(too_long)),
            Err(CoreError::Validation(ValidationError::TooLong { .. }))
        ));
        assert_eq!(draft.lines()[0].description.as_deref(), Some("Blue widget"));

        draft.set_description(0, None).unwrap();
        assert!(draft.lines()[0].description.is_none());
        assert!(matches!(
            draft.set_description(3, None),
            Err(CoreError::LineNotFound { index: 3, len: 1 })
        ));
    }

    #[test]
    fn test_with_lines_computes_like_added_lines() {
        let catalog = catalog();
        let draft = InvoiceDraft::with_lines(TaxMode::Inclusive, vec![widget(), widget()]);

        assert_eq!(draft.len(), 2);
        assert_eq!(draft.totals(&catalog).unwrap().grand_total.amount(), dec!(472));
    }

    #[test]
    fn test_with_lines_invalid_line_rejected_on_read() {
        let catalog = catalog();
        let mut negative = widget();
        negative.quantity = dec!(-3);

        let draft = InvoiceDraft::with_lines(TaxMode::Exclusive, vec![widget(), negative]);
        assert!(matches!(
            draft.totals(&catalog),
            Err(CoreError::InvalidQuantity { .. })
        ));
        assert!(draft.line_amounts(&catalog).is_err());
    }

    #[test]
    fn test_deserialized_draft_is_checked_on_read() {
        let draft: InvoiceDraft = serde_json::from_str(
            r#"{"tax_mode":"exclusive","lines":[{"quantity":"1","unit_price":"-5"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            draft.totals(&Catalog::default()),
            Err(CoreError::InvalidUnitPrice { .. })
        ));
    }

    #[test]
    fn test_zero_quantity_line_kept() {
        let mut draft = InvoiceDraft::new(TaxMode::Exclusive);
        draft.add_line(widget()).unwrap();
        draft.set_quantity(0, dec!(0)).unwrap();

        assert_eq!(draft.len(), 1);
        assert!(draft.totals(&catalog()).unwrap().is_zero());
    }
}
