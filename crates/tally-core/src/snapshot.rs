//! # Invoice Snapshot
//!
//! Freezes a draft's computed values at save or print time.
//!
//! A snapshot is write-once. It records what the engine produced at
//! `captured_at`; it is never fed back into the engine. Live values always
//! come from recomputing the draft.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::draft::InvoiceDraft;
use crate::error::CoreResult;
use crate::line::LineAmounts;
use crate::money::Money;
use crate::totals::{aggregate, InvoiceTotals};
use crate::types::{TaxMode, TaxRate};
use crate::words::AmountWordsRenderer;

/// One line as printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SnapshotLine {
    pub line_id: String,
    pub description: String,
    #[ts(type = "string")]
    pub quantity: Decimal,
    /// Unit price as entered.
    pub unit_price: Money,
    /// Rate resolved at capture time.
    pub tax_rate: TaxRate,
    /// Display-rounded amounts.
    pub amounts: LineAmounts,
}

/// Point-in-time copy of an invoice's derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceSnapshot {
    pub id: String,
    pub tax_mode: TaxMode,
    pub lines: Vec<SnapshotLine>,
    /// Display view of the totals (figures add up on paper).
    pub totals: InvoiceTotals,
    /// The grand total in words.
    pub amount_in_words: String,
    #[ts(as = "String")]
    pub captured_at: DateTime<Utc>,
}

impl InvoiceSnapshot {
    /// Computes every value of `draft` and freezes it.
    ///
    /// Totals come from the unrounded line amounts; only the stored copies
    /// are rounded.
    pub fn capture(
        draft: &InvoiceDraft,
        catalog: &Catalog,
        renderer: &AmountWordsRenderer,
    ) -> CoreResult<Self> {
        let amounts = draft.line_amounts(catalog)?;
        let totals = aggregate(&amounts)?;
        let amount_in_words = renderer.render_money(totals.grand_total)?;

        let lines = draft
            .lines()
            .iter()
            .zip(&amounts)
            .map(|(line, amounts)| SnapshotLine {
                line_id: line.id.clone(),
                description: line.display_description(catalog),
                quantity: line.quantity,
                unit_price: line.unit_price,
                tax_rate: catalog.tax_rate(line.tax_rate_id.as_deref()),
                amounts: amounts.rounded(),
            })
            .collect();

        Ok(InvoiceSnapshot {
            id: Uuid::new_v4().to_string(),
            tax_mode: draft.tax_mode(),
            lines,
            totals: totals.rounded(),
            amount_in_words,
            captured_at: Utc::now(),
        })
    }

    /// Grand total as printed.
    pub fn total_amount(&self) -> Money {
        self.totals.grand_total
    }
}
