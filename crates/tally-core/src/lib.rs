//! # tally-core: Invoice Math for Tally
//!
//! This crate holds the financial computation behind an invoice: how an
//! entered price splits into base and tax, how lines scale by quantity, how
//! lines add up to invoice totals, and how the payable amount reads in words.
//! Everything is a pure function of its inputs, with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │     Editing surface / CLI (owns lines, catalog, tax mode)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ every edit                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │    tax    │─►│   line    │─►│  totals   │  │   words   │  │   │
//! │  │   │ TaxSplit  │  │LineAmounts│  │InvoiceTot.│  │ Renderer  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   draft • snapshot • payment • catalog • validation             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   Persistence / print (stores InvoiceSnapshot, prints words)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tax`] - Splits an entered price into base and tax by tax mode
//! - [`line`] - Scales the split by quantity
//! - [`totals`] - Aggregates lines, rounding once at the end
//! - [`words`] - Amount in words
//! - [`draft`] - Editable invoice body with one price entry point per mode
//! - [`snapshot`] - Write-once copy of computed values
//! - [`payment`] - Settlement against the grand total
//! - [`catalog`] - Live lookup of products and tax rates
//! - [`money`] - Decimal money type
//! - [`types`] - Domain types
//! - [`validation`] - Input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tally_core::{Catalog, InvoiceDraft, LineItem, Money, TaxMode, TaxRate, TaxRateEntry};
//!
//! let catalog = Catalog::new(
//!     Vec::new(),
//!     vec![TaxRateEntry {
//!         id: "gst-18".into(),
//!         name: "GST 18%".into(),
//!         percentage: TaxRate::from_percentage(Decimal::from(18)).unwrap(),
//!     }],
//! );
//!
//! let mut draft = InvoiceDraft::new(TaxMode::Inclusive);
//! draft
//!     .add_line(LineItem::new("Widget", Decimal::from(2), Money::new(Decimal::from(118))).with_tax_rate("gst-18"))
//!     .unwrap();
//!
//! let totals = draft.totals(&catalog).unwrap();
//! assert_eq!(totals.subtotal, Money::new(Decimal::from(200)));
//! assert_eq!(totals.grand_total, Money::new(Decimal::from(236)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod draft;
pub mod error;
pub mod line;
pub mod money;
pub mod payment;
pub mod snapshot;
pub mod tax;
pub mod totals;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use draft::InvoiceDraft;
pub use error::{CoreError, CoreResult, ValidationError};
pub use line::{calculate_line, LineAmounts};
pub use money::Money;
pub use payment::{settle, PaymentStatus, PaymentSummary};
pub use snapshot::{InvoiceSnapshot, SnapshotLine};
pub use tax::{resolve_tax, TaxSplit};
pub use totals::{aggregate, compute_totals, InvoiceTotals};
pub use types::*;
pub use words::{amount_in_words, AmountWordsRenderer, NumberingSystem};
