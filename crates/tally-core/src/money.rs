//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents fix addition but not tax-inclusive prices:               │
//! │    118.00 / 1.18 = 100.00   (fine)                                     │
//! │    100.00 / 1.0825 = 92.378752886836...  (needs more than 2 places)    │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal, unrounded until display                 │
//! │    Internal values keep up to 28 significant digits                     │
//! │    round_display() is applied ONCE, where a value is shown or stored   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let line = price.multiply_quantity(Decimal::new(15, 1)).unwrap(); // × 1.5
//! assert_eq!(line.amount(), Decimal::new(16485, 3)); // 16.485, unrounded
//! assert_eq!(line.round_display().to_string(), "16.49");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

/// Number of decimal places shown on screen and stored in snapshots.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in major currency units (e.g. 10.99).
///
/// ## Design Decisions
/// - **Decimal (signed)**: negative values appear in balances and refunds;
///   line inputs are validated non-negative separately
/// - **Unrounded**: arithmetic never rounds, see [`Money::round_display`]
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► TaxSplit { base, tax } ──► LineAmounts (× qty)
///                                                         │
///                  InvoiceTotals { subtotal, tax_total } ◄┘
///                                │
///                                ▼
///                grand_total.round_display() ──► amount in words
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a decimal amount in major units.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (hundredths of the major unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the underlying unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Rounds to two decimal places, midpoint away from zero.
    ///
    /// ## Round-at-the-end Policy
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Three lines of 33.333… each:                                       │
    /// │                                                                     │
    /// │  Round each, then sum:   33.33 + 33.33 + 33.33 = 99.99  ❌          │
    /// │  Sum, then round once:   99.999…            → 100.00    ✅          │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    /// The result always carries exactly two decimal places (5 → 5.00).
    /// Call this only where a value leaves the engine: on screen, in a
    /// snapshot, or before rendering words.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tally_core::money::Money;
    ///
    /// let half_cent = Money::new(Decimal::new(2125, 3)); // 2.125
    /// assert_eq!(half_cent.round_display().amount(), Decimal::new(213, 2));
    /// ```
    pub fn round_display(&self) -> Money {
        let mut rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DISPLAY_DECIMALS);
        Money(rounded)
    }

    /// Multiplies money by a (possibly fractional) quantity.
    ///
    /// Returns `None` when the product does not fit in a `Decimal`.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// let line_total = unit_price.multiply_quantity(Decimal::from(3));
    /// assert_eq!(line_total, Some(Money::from_cents(897)));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: Decimal) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Addition that returns `None` instead of panicking on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the display-rounded value with exactly two decimals, no symbol.
///
/// Currency symbols and grouping belong to the rendering surface.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.round_display().0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a decimal factor (quantity or rate fraction).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0 * factor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::new(dec!(5)).to_string(), "5.00");
        assert_eq!(Money::new(dec!(-5.5)).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::new(dec!(278.475)).to_string(), "278.48");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10));
        let b = Money::new(dec!(5));

        assert_eq!((a + b).amount(), dec!(15));
        assert_eq!((a - b).amount(), dec!(5));
        assert_eq!((a * dec!(3)).amount(), dec!(30));

        let mut c = a;
        c += b;
        c -= Money::new(dec!(1));
        assert_eq!(c.amount(), dec!(14));
    }

    #[test]
    fn test_round_display_midpoint_away_from_zero() {
        assert_eq!(Money::new(dec!(0.125)).round_display().amount(), dec!(0.13));
        assert_eq!(Money::new(dec!(0.135)).round_display().amount(), dec!(0.14));
        assert_eq!(Money::new(dec!(-0.125)).round_display().amount(), dec!(-0.13));
        assert_eq!(Money::new(dec!(0.124)).round_display().amount(), dec!(0.12));
    }

    #[test]
    fn test_multiply_fractional_quantity() {
        let unit_price = Money::new(dec!(12.50));
        assert_eq!(unit_price.multiply_quantity(dec!(0.5)).unwrap().amount(), dec!(6.25));
        assert!(unit_price.multiply_quantity(Decimal::ZERO).unwrap().is_zero());
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let huge = Money::new(Decimal::MAX);
        assert!(huge.multiply_quantity(dec!(2)).is_none());
        assert!(huge.checked_add(Money::from_cents(100)).is_none());
        assert_eq!(
            Money::from_cents(150).checked_add(Money::from_cents(250)),
            Some(Money::from_cents(400))
        );
    }

    /// Summing unrounded thirds and rounding once keeps the full amount;
    /// rounding each third first loses a cent.
    #[test]
    fn test_round_once_at_the_end() {
        let third = Money::new(dec!(100) / dec!(3));

        let rounded = third.round_display();
        let rounded_each = rounded + rounded + rounded;
        let rounded_once = (third + third + third).round_display();

        assert_eq!(rounded_each.amount(), dec!(99.99));
        assert_eq!(rounded_once.amount(), dec!(100.00));
    }

    #[test]
    fn test_parse() {
        let money: Money = " 105.50 ".parse().unwrap();
        assert_eq!(money.amount(), dec!(105.5));
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::from_cents(-550).abs(), Money::from_cents(550));
    }
}
