//! # Catalog
//!
//! Read-only view of the products and tax rates an invoice may reference.
//!
//! The editing session owns and mutates the catalog; the engine only looks
//! things up. Missing references are never errors:
//!
//! ```text
//! tax_rate_id: None            ──► 0%
//! tax_rate_id: Some("deleted") ──► 0%  (warn!)
//! tax_rate_id: Some("gst-18")  ──► 18%
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{Product, TaxRate, TaxRateEntry};

/// Products and tax rates available to an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub tax_rates: Vec<TaxRateEntry>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, tax_rates: Vec<TaxRateEntry>) -> Self {
        Catalog {
            products,
            tax_rates,
        }
    }

    /// Looks up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a configured tax rate entry by id.
    pub fn tax_rate_entry(&self, id: &str) -> Option<&TaxRateEntry> {
        self.tax_rates.iter().find(|r| r.id == id)
    }

    /// Resolves a line's tax rate reference to a rate, live.
    ///
    /// No selection and unknown ids both resolve to 0%.
    pub fn tax_rate(&self, id: Option<&str>) -> TaxRate {
        let Some(id) = id else {
            return TaxRate::zero();
        };

        match self.tax_rate_entry(id) {
            Some(entry) => entry.percentage,
            None => {
                warn!(tax_rate_id = %id, "Unknown tax rate id, using 0%");
                TaxRate::zero()
            }
        }
    }
}
