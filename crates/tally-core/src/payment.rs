//! # Payment Settlement
//!
//! Compares recorded payments against an invoice's grand total.
//!
//! ```text
//! grand_total = 514.48
//!
//! payments: []               ──► Unpaid         balance 514.48
//! payments: [200.00]         ──► PartiallyPaid  balance 314.48
//! payments: [200.00, 314.48] ──► Paid           balance   0.00
//! payments: [600.00]         ──► Overpaid       balance −85.52
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_payment_amount;

/// Settlement state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
    /// More was received than billed; `balance_due` is negative.
    Overpaid,
}

/// Result of [`settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentSummary {
    pub amount_paid: Money,
    pub balance_due: Money,
    pub status: PaymentStatus,
}

/// Settles `payments` against `grand_total`.
///
/// Both sides are compared at display precision, so a grand total of
/// 99.999… is settled by a payment of 100.00.
///
/// ## Errors
/// [`CoreError::InvalidPaymentAmount`](crate::CoreError::InvalidPaymentAmount)
/// if any payment is zero or negative,
/// [`CoreError::AmountOverflow`](crate::CoreError::AmountOverflow) if the
/// payments do not fit in one sum.
pub fn settle(grand_total: Money, payments: &[Money]) -> CoreResult<PaymentSummary> {
    for payment in payments {
        validate_payment_amount(*payment)?;
    }

    let amount_paid = payments
        .iter()
        .try_fold(Money::zero(), |acc, payment| acc.checked_add(*payment))
        .ok_or_else(|| CoreError::AmountOverflow {
            operation: "amount paid".to_string(),
        })?
        .round_display();
    let balance_due = grand_total.round_display() - amount_paid;

    let status = if balance_due.is_negative() {
        PaymentStatus::Overpaid
    } else if balance_due.is_zero() {
        PaymentStatus::Paid
    } else if amount_paid.is_zero() {
        PaymentStatus::Unpaid
    } else {
        PaymentStatus::PartiallyPaid
    };

    Ok(PaymentSummary {
        amount_paid,
        balance_due,
        status,
    })
}
