//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │  TaxRateEntry   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product_id?    │   │  id             │       │
//! │  │  name           │   │  description?   │──►│  name           │       │
//! │  │  unit_price     │   │  quantity       │   │  percentage     │       │
//! │  │  tax_rate_id?   │   │  unit_price     │   └─────────────────┘       │
//! │  └─────────────────┘   │  tax_rate_id?   │                              │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    TaxRate      │   │    TaxMode      │  one per invoice, never      │
//! │  │  percentage     │   │  Exclusive      │  per line                    │
//! │  │  0 ..= 100      │   │  Inclusive      │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines hold references (`product_id`, `tax_rate_id`), never copies of the
//! referenced rate. The rate is looked up live on every computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a percentage in `[0, 100]` (18 = 18%).
///
/// ## Invariant
/// Every constructor, including deserialization, rejects values outside
/// `[0, 100]` with [`CoreError::InvalidRate`]. A `TaxRate` in hand is
/// always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct TaxRate(#[ts(type = "string")] Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tally_core::TaxRate;
    ///
    /// assert!(TaxRate::from_percentage(Decimal::from(18)).is_ok());
    /// assert!(TaxRate::from_percentage(Decimal::from(-1)).is_err());
    /// assert!(TaxRate::from_percentage(Decimal::from(101)).is_err());
    /// ```
    pub fn from_percentage(percentage: Decimal) -> CoreResult<Self> {
        if percentage < Decimal::ZERO || percentage > ONE_HUNDRED {
            return Err(CoreError::InvalidRate { percentage });
        }
        Ok(TaxRate(percentage.normalize()))
    }

    /// Creates a tax rate from basis points (825 = 8.25%).
    pub fn from_bps(bps: u32) -> CoreResult<Self> {
        Self::from_percentage(Decimal::new(i64::from(bps), 2))
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percentage(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a fraction (18% → 0.18).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / ONE_HUNDRED
    }

    /// Zero tax rate, the default when no rate is selected.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl<'de> Deserialize<'de> for TaxRate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let percentage = <Decimal as Deserialize>::deserialize(deserializer)?;
        TaxRate::from_percentage(percentage).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tax Mode
// =============================================================================

/// Whether entered unit prices already contain tax.
///
/// Applies uniformly to every line of one invoice. Mixing inclusive and
/// exclusive lines within one invoice is not supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Price + tax shown separately; entered price is the base price.
    #[default]
    Exclusive,
    /// Entered price includes tax; base price is derived.
    Inclusive,
}

impl TaxMode {
    /// Maps the `isTaxInclusive` flag onto a mode.
    #[inline]
    pub const fn from_inclusive_flag(is_tax_inclusive: bool) -> Self {
        if is_tax_inclusive {
            TaxMode::Inclusive
        } else {
            TaxMode::Exclusive
        }
    }

    /// Returns true for [`TaxMode::Inclusive`].
    #[inline]
    pub const fn is_tax_inclusive(&self) -> bool {
        matches!(self, TaxMode::Inclusive)
    }
}

impl fmt::Display for TaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxMode::Exclusive => write!(f, "exclusive"),
            TaxMode::Inclusive => write!(f, "inclusive"),
        }
    }
}

impl FromStr for TaxMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exclusive" | "excl" | "false" => Ok(TaxMode::Exclusive),
            "inclusive" | "incl" | "true" => Ok(TaxMode::Inclusive),
            other => Err(format!(
                "Unknown tax mode: '{}'. Valid options: exclusive, inclusive",
                other
            )),
        }
    }
}

// =============================================================================
// Catalog Entries
// =============================================================================

/// A configured, named tax rate (e.g. "GST 18%").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRateEntry {
    pub id: String,
    pub name: String,
    pub percentage: TaxRate,
}

/// A product or service from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: String,
    /// Display name, used as the line description when the line has none.
    pub name: String,
    /// Default unit price offered when the product is picked.
    pub unit_price: Money,
    /// Default tax rate reference.
    #[serde(default)]
    pub tax_rate_id: Option<String>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One invoice row.
///
/// ## Fields and Meaning
/// - `unit_price` is entered by the user; whether it includes tax is decided
///   by the invoice [`TaxMode`], not by the line
/// - `tax_rate_id: None` means 0%
/// - `quantity` may be fractional; zero is valid and contributes nothing
///
/// Derived values (base price, tax, total) are never stored here. They are
/// recomputed from these inputs on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Line identifier (UUID v4).
    #[serde(default = "new_line_id")]
    pub id: String,

    /// Borrowed reference into the product catalog.
    #[serde(default)]
    pub product_id: Option<String>,

    /// Free text. Falls back to the product name when absent.
    #[serde(default)]
    pub description: Option<String>,

    #[ts(type = "string")]
    pub quantity: Decimal,

    pub unit_price: Money,

    /// Reference into the tax rate catalog.
    #[serde(default)]
    pub tax_rate_id: Option<String>,
}

fn new_line_id() -> String {
    Uuid::new_v4().to_string()
}

impl LineItem {
    /// Creates a free-text line with no product and no tax rate.
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Money) -> Self {
        LineItem {
            id: new_line_id(),
            product_id: None,
            description: Some(description.into()),
            quantity,
            unit_price,
            tax_rate_id: None,
        }
    }

    /// Creates a line from a catalog product.
    ///
    /// Price and tax rate reference are pre-filled from the product. The
    /// description stays empty so it keeps following the product name.
    pub fn from_product(product: &Product, quantity: Decimal) -> Self {
        LineItem {
            id: new_line_id(),
            product_id: Some(product.id.clone()),
            description: None,
            quantity,
            unit_price: product.unit_price,
            tax_rate_id: product.tax_rate_id.clone(),
        }
    }

    /// Sets the tax rate reference.
    pub fn with_tax_rate(mut self, tax_rate_id: impl Into<String>) -> Self {
        self.tax_rate_id = Some(tax_rate_id.into());
        self
    }

    /// Description to show: own text, else product name, else empty.
    pub fn display_description(&self, catalog: &Catalog) -> String {
        if let Some(description) = self.description.as_deref().map(str::trim) {
            if !description.is_empty() {
                return description.to_string();
            }
        }

        self.product_id
            .as_deref()
            .and_then(|id| catalog.product(id))
            .map(|product| product.name.clone())
            .unwrap_or_default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
