//! # Report Output
//!
//! Turns an [`InvoiceSnapshot`] into what `tally` prints.
//!
//! ```text
//! #  Description          Qty    Unit price        Base         Tax       Total
//! 1  Widget                 2       ₹118.00     ₹200.00      ₹36.00     ₹236.00
//! ──────────────────────────────────────────────────────────────────────────────
//!                                             Subtotal                 ₹200.00
//!                                             Tax                       ₹36.00
//!                                             Grand total              ₹236.00
//!
//! Two hundred thirty six rupees
//! ```

use std::fmt::Write;
use tally_core::{InvoiceSnapshot, Money};

use crate::config::TallyConfig;
use crate::error::CliResult;

const DESCRIPTION_WIDTH: usize = 20;
const RULE_WIDTH: usize = 78;

/// Plain-text report with one row per line and the totals block.
pub fn render_text(snapshot: &InvoiceSnapshot, config: &TallyConfig) -> String {
    let symbol = config.currency.symbol.as_str();
    let money = |amount: Money| format!("{}{}", symbol, amount);

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "Tax mode: {}    Currency: {}",
        snapshot.tax_mode, config.currency.code
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<3}{:<width$} {:>6} {:>13} {:>11} {:>11} {:>11}",
        "#",
        "Description",
        "Qty",
        "Unit price",
        "Base",
        "Tax",
        "Total",
        width = DESCRIPTION_WIDTH
    );

    for (index, line) in snapshot.lines.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<3}{:<width$} {:>6} {:>13} {:>11} {:>11} {:>11}",
            index + 1,
            truncate(&line.description, DESCRIPTION_WIDTH),
            line.quantity.normalize().to_string(),
            money(line.unit_price),
            money(line.amounts.line_base),
            money(line.amounts.line_tax),
            money(line.amounts.line_total),
            width = DESCRIPTION_WIDTH
        );
    }

    let _ = writeln!(out, "{}", "─".repeat(RULE_WIDTH));

    let totals = &snapshot.totals;
    for (label, amount) in [
        ("Subtotal", totals.subtotal),
        ("Tax", totals.tax_total),
        ("Grand total", totals.grand_total),
    ] {
        let _ = writeln!(out, "{:>56} {:>21}", label, money(amount));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", snapshot.amount_in_words);
    out
}

/// Pretty-printed snapshot JSON.
pub fn render_json(snapshot: &InvoiceSnapshot) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_core::{
        AmountWordsRenderer, Catalog, InvoiceDraft, LineItem, TaxMode, TaxRate, TaxRateEntry,
    };

    fn snapshot(mode: TaxMode) -> InvoiceSnapshot {
        let catalog = Catalog::new(
            Vec::new(),
            vec![TaxRateEntry {
                id: "gst-18".to_string(),
                name: "GST 18%".to_string(),
                percentage: TaxRate::from_percentage(dec!(18)).unwrap(),
            }],
        );
        let mut draft = InvoiceDraft::new(mode);
        draft
            .add_line(LineItem::new("Widget", dec!(2), Money::new(dec!(118))).with_tax_rate("gst-18"))
            .unwrap();
        InvoiceSnapshot::capture(&draft, &catalog, &AmountWordsRenderer::default()).unwrap()
    }

    #[test]
    fn test_text_report_inclusive() {
        let text = render_text(&snapshot(TaxMode::Inclusive), &TallyConfig::default());

        assert!(text.contains("Tax mode: inclusive"));
        assert!(text.contains("Widget"));
        assert!(text.contains("$200.00"));
        assert!(text.contains("$36.00"));
        assert!(text.contains("$236.00"));
        assert!(text.trim_end().ends_with("Two hundred thirty six"));
    }

    #[test]
    fn test_text_report_uses_configured_symbol() {
        let mut config = TallyConfig::default();
        config.currency.symbol = "₹".to_string();
        config.currency.code = "INR".to_string();

        let text = render_text(&snapshot(TaxMode::Exclusive), &config);
        assert!(text.contains("Currency: INR"));
        assert!(text.contains("₹278.48"));
        assert!(text.contains("₹42.48"));
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&snapshot(TaxMode::Exclusive)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tax_mode"], "exclusive");
        assert_eq!(value["totals"]["grand_total"], "278.48");
        assert_eq!(value["lines"][0]["description"], "Widget");
    }

    #[test]
    fn test_line_row_is_padded() {
        let text = render_text(&snapshot(TaxMode::Exclusive), &TallyConfig::default());
        let row = text
            .lines()
            .find(|l| l.starts_with("1  "))
            .unwrap();

        assert!(row.starts_with(&format!("1  {:<20} ", "Widget")));
        assert!(row.ends_with("$278.48"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Widget", 20), "Widget");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
