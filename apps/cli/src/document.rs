//! # Invoice Document
//!
//! The file format `tally` reads: an optional tax mode, the catalog, and the
//! invoice lines, in TOML or JSON.
//!
//! ```toml
//! tax_mode = "inclusive"
//!
//! [[tax_rates]]
//! id = "gst-18"
//! name = "GST 18%"
//! percentage = 18
//!
//! [[products]]
//! id = "widget"
//! name = "Widget"
//! unit_price = "118"
//! tax_rate_id = "gst-18"
//!
//! [[lines]]
//! product_id = "widget"
//! quantity = 2
//! ```
//!
//! A line that names a product takes the product's price and tax rate unless
//! it sets its own. A line without a product must carry a `unit_price`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tally_core::{Catalog, InvoiceDraft, LineItem, Money, Product, TaxMode, TaxRateEntry};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// On-disk encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    /// `.toml` or `.json`, case-insensitive.
    pub fn from_path(path: &Path) -> CliResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(DocumentFormat::Toml),
            Some("json") => Ok(DocumentFormat::Json),
            _ => Err(CliError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// One `[[lines]]` entry as written in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLine {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: Decimal,
    #[serde(default)]
    pub unit_price: Option<Money>,
    #[serde(default)]
    pub tax_rate_id: Option<String>,
}

/// A whole invoice file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    /// Falls back to the configured default when absent.
    #[serde(default)]
    pub tax_mode: Option<TaxMode>,
    #[serde(default)]
    pub tax_rates: Vec<TaxRateEntry>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

impl InvoiceDocument {
    /// Reads and parses a document, picking the format by extension.
    pub fn load(path: &Path) -> CliResult<Self> {
        let format = DocumentFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        debug!(?path, ?format, "Parsing invoice document");
        Self::parse(&contents, format)
    }

    pub fn parse(contents: &str, format: DocumentFormat) -> CliResult<Self> {
        match format {
            DocumentFormat::Toml => Ok(toml::from_str(contents)?),
            DocumentFormat::Json => Ok(serde_json::from_str(contents)?),
        }
    }

    /// Splits the document into the engine's catalog and draft.
    ///
    /// Every line goes through [`InvoiceDraft::add_line`], so quantity and
    /// price are validated here.
    pub fn into_draft(self, default_mode: TaxMode) -> CliResult<(InvoiceDraft, Catalog)> {
        let catalog = Catalog::new(self.products, self.tax_rates);
        let mut draft = InvoiceDraft::new(self.tax_mode.unwrap_or(default_mode));

        for (index, line) in self.lines.into_iter().enumerate() {
            let item = resolve_line(line, &catalog)
                .map_err(|reason| CliError::InvalidDocument(format!("line {}: {}", index + 1, reason)))?;
            draft.add_line(item)?;
        }

        debug!(
            lines = draft.len(),
            tax_mode = %draft.tax_mode(),
            "Invoice document loaded"
        );
        Ok((draft, catalog))
    }
}

fn resolve_line(line: DocumentLine, catalog: &Catalog) -> Result<LineItem, String> {
    let mut item = match line.product_id.as_deref() {
        Some(product_id) => {
            let product = catalog
                .product(product_id)
                .ok_or_else(|| format!("unknown product '{}'", product_id))?;
            LineItem::from_product(product, line.quantity)
        }
        None => {
            let price = line
                .unit_price
                .ok_or_else(|| "unit_price is required without a product_id".to_string())?;
            LineItem::new(String::new(), line.quantity, price)
        }
    };

    if let Some(id) = line.id {
        item.id = id;
    }
    item.description = line.description.filter(|d| !d.trim().is_empty());
    if let Some(price) = line.unit_price {
        item.unit_price = price;
    }
    if line.tax_rate_id.is_some() {
        item.tax_rate_id = line.tax_rate_id;
    }

    Ok(item)
}
