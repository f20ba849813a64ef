//! `tally <invoice-file>`: compute and print an invoice.

use std::path::Path;
use tally_core::InvoiceSnapshot;
use tracing::info;

use crate::config::TallyConfig;
use crate::document::InvoiceDocument;
use crate::error::CliResult;
use crate::report::{render_json, render_text};

/// Loads the document at `path`, runs the engine and formats the result.
pub fn render_invoice(path: &Path, config: &TallyConfig, json: bool) -> CliResult<String> {
    let document = InvoiceDocument::load(path)?;
    let (draft, catalog) = document.into_draft(config.invoice.tax_mode)?;

    let snapshot = InvoiceSnapshot::capture(&draft, &catalog, &config.renderer())?;
    info!(
        lines = snapshot.lines.len(),
        tax_mode = %snapshot.tax_mode,
        grand_total = %snapshot.total_amount(),
        "Invoice computed"
    );

    if json {
        render_json(&snapshot)
    } else {
        Ok(render_text(&snapshot, config))
    }
}
