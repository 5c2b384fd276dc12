//! Balance check for a single event.

use rust_decimal::Decimal;
use thiserror::Error;

use hotelbooks_shared::types::RoundingPolicy;

use super::types::{EventTotals, StatementEvent};

/// Validation errors for statement events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerValidationError {
    /// Event debits and credits differ by a cent or more.
    #[error("Event is unbalanced: debits ({debits}) != credits ({credits})")]
    Unbalanced {
        /// Total rounded debit amount.
        debits: Decimal,
        /// Total rounded credit amount.
        credits: Decimal,
    },

    /// Event debits or credits sum past the range of `Decimal`.
    #[error("Event amounts overflow the decimal range")]
    AmountOverflow,
}

impl LedgerValidationError {
    /// Returns the error code for structured output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unbalanced { .. } => "UNBALANCED_EVENT",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
        }
    }
}

/// Sums an event's rounded debits and credits.
///
/// Returns `None` when either side overflows.
#[must_use]
pub fn event_totals(event: &StatementEvent, rounding: RoundingPolicy) -> Option<EventTotals> {
    let debit = rounding.checked_sum(event.journal_deltas.iter().map(|d| d.debit))?;
    let credit = rounding.checked_sum(event.journal_deltas.iter().map(|d| d.credit))?;
    Some(EventTotals::new(debit, credit))
}

/// Validates that an event's rounded debits equal its rounded credits
/// within tolerance.
///
/// An event with no journal lines is balanced.
///
/// # Errors
///
/// Returns `LedgerValidationError::Unbalanced` carrying both totals, or
/// `LedgerValidationError::AmountOverflow` when the totals cannot be computed.
pub fn validate_event(
    event: &StatementEvent,
    rounding: RoundingPolicy,
) -> Result<EventTotals, LedgerValidationError> {
    let totals = event_totals(event, rounding).ok_or(LedgerValidationError::AmountOverflow)?;
    if totals.is_balanced {
        Ok(totals)
    } else {
        Err(LedgerValidationError::Unbalanced {
            debits: totals.debit,
            credits: totals.credit,
        })
    }
}
