//! # Amount in Words
//!
//! Renders a payable amount as English words for the legal line of a
//! printed invoice.
//!
//! ## Algorithm
//! ```text
//! 1234567.891
//!    │
//!    ├── whole part 1234567 ──► groups ──► 0..999 chunks
//!    │      International: 1 | 234 | 567  → million | thousand | -
//!    │      Indian:        12 | 34 | 567  → lakh | thousand | -
//!    │
//!    └── first two fraction digits "89" (the trailing 1 is dropped,
//!        not rounded) ──► "eighty nine" + subunit label
//!
//! "One million two hundred thirty four thousand five hundred sixty seven
//!  and eighty nine cents"
//! ```
//!
//! Only the first word is capitalized. Negative amounts are rejected.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Group labels for the international system, lowest first.
const INTERNATIONAL_GROUPS: [&str; 5] = ["", "thousand", "million", "billion", "trillion"];

/// First value the international labels cannot name (10^15).
const INTERNATIONAL_LIMIT: u64 = 1_000_000_000_000_000;

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;

// =============================================================================
// Numbering System
// =============================================================================

/// How digits are grouped into named units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingSystem {
    /// Thousand, million, billion, trillion.
    #[default]
    International,
    /// Thousand, lakh, crore. Counts of crores render recursively
    /// ("one lakh crore").
    Indian,
}

impl fmt::Display for NumberingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberingSystem::International => write!(f, "international"),
            NumberingSystem::Indian => write!(f, "indian"),
        }
    }
}

impl FromStr for NumberingSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "international" | "western" => Ok(NumberingSystem::International),
            "indian" | "lakh" => Ok(NumberingSystem::Indian),
            other => Err(format!(
                "Unknown numbering system: '{}'. Valid options: international, indian",
                other
            )),
        }
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Converts non-negative amounts into words.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tally_core::AmountWordsRenderer;
///
/// let renderer = AmountWordsRenderer::default();
/// assert_eq!(renderer.render(Decimal::ZERO).unwrap(), "Zero");
/// assert_eq!(
///     renderer.render(Decimal::new(10550, 2)).unwrap(),
///     "One hundred five and fifty cents"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountWordsRenderer {
    unit_label: Option<String>,
    subunit_label: String,
    numbering: NumberingSystem,
}

impl Default for AmountWordsRenderer {
    fn default() -> Self {
        AmountWordsRenderer {
            unit_label: None,
            subunit_label: "cents".to_string(),
            numbering: NumberingSystem::International,
        }
    }
}

impl AmountWordsRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Word appended after the whole units ("rupees"). None by default.
    pub fn with_unit_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into().trim().to_lowercase();
        self.unit_label = (!label.is_empty()).then_some(label);
        self
    }

    /// Word appended after the fractional part ("paise", "cents").
    pub fn with_subunit_label(mut self, label: impl Into<String>) -> Self {
        self.subunit_label = label.into().trim().to_lowercase();
        self
    }

    pub fn with_numbering(mut self, numbering: NumberingSystem) -> Self {
        self.numbering = numbering;
        self
    }

    pub fn numbering(&self) -> NumberingSystem {
        self.numbering
    }

    /// Renders a money value as-is. Round it first if it is a raw total.
    pub fn render_money(&self, amount: Money) -> CoreResult<String> {
        self.render(amount.amount())
    }

    /// Renders `amount` in words.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidAmount`] for negative input
    /// - [`CoreError::AmountTooLarge`] past the last group label
    pub fn render(&self, amount: Decimal) -> CoreResult<String> {
        if amount < Decimal::ZERO {
            return Err(CoreError::InvalidAmount { amount });
        }

        let whole = amount.trunc();
        let hundredths = ((amount - whole) * Decimal::ONE_HUNDRED)
            .trunc()
            .to_u64()
            .unwrap_or(0);
        let whole = whole
            .to_u64()
            .ok_or(CoreError::AmountTooLarge { amount })?;

        let mut out = match self.numbering {
            NumberingSystem::International => {
                if whole >= INTERNATIONAL_LIMIT {
                    return Err(CoreError::AmountTooLarge { amount });
                }
                international(whole)
            }
            NumberingSystem::Indian => indian(whole),
        };

        if let Some(unit) = &self.unit_label {
            out.push(' ');
            out.push_str(unit);
        }

        if hundredths > 0 {
            out.push_str(" and ");
            out.push_str(&below_hundred(hundredths));
            if !self.subunit_label.is_empty() {
                out.push(' ');
                out.push_str(&self.subunit_label);
            }
        }

        Ok(capitalize_first(&out))
    }
}

/// Renders with the default renderer (no unit label, "cents").
pub fn amount_in_words(amount: Decimal) -> CoreResult<String> {
    AmountWordsRenderer::default().render(amount)
}

// =============================================================================
// Chunk Rendering
// =============================================================================

/// 1..=99
fn below_hundred(n: u64) -> String {
    let n = n as usize;
    if n < 20 {
        return ONES[n].to_string();
    }
    match n % 10 {
        0 => TENS[n / 10].to_string(),
        ones => format!("{} {}", TENS[n / 10], ONES[ones]),
    }
}

/// 1..=999
fn below_thousand(n: u64) -> String {
    let hundreds = n / 100;
    let rest = n % 100;

    match (hundreds, rest) {
        (0, r) => below_hundred(r),
        (h, 0) => format!("{} hundred", ONES[h as usize]),
        (h, r) => format!("{} hundred {}", ONES[h as usize], below_hundred(r)),
    }
}

fn international(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts = Vec::new();
    let mut rest = n;
    for label in INTERNATIONAL_GROUPS {
        let chunk = rest % 1000;
        if chunk > 0 {
            let words = below_thousand(chunk);
            parts.push(if label.is_empty() {
                words
            } else {
                format!("{} {}", words, label)
            });
        }
        rest /= 1000;
        if rest == 0 {
            break;
        }
    }

    parts.reverse();
    parts.join(" ")
}

fn indian(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts = Vec::new();

    let crores = n / CRORE;
    if crores > 0 {
        parts.push(format!("{} crore", indian(crores)));
    }

    let rest = n % CRORE;
    let lakhs = rest / LAKH;
    let thousands = (rest % LAKH) / 1000;
    let hundreds = rest % 1000;

    if lakhs > 0 {
        parts.push(format!("{} lakh", below_hundred(lakhs)));
    }
    if thousands > 0 {
        parts.push(format!("{} thousand", below_hundred(thousands)));
    }
    if hundreds > 0 {
        parts.push(below_thousand(hundreds));
    }

    parts.join(" ")
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
