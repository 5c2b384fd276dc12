//! Double-entry bookkeeping logic.
//!
//! This module implements the ledger half of the statement engine:
//! - Domain types for events, journal lines and posted entries
//! - The chart of accounts
//! - Balance calculations per normal side
//! - Event balance validation and posting
//! - Trial balance aggregation

pub mod accounts;
pub mod balance;
pub mod error;
pub mod posting;
pub mod trial_balance;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use accounts::{AccountDefinition, AccountRegistry, CASH_ACCOUNT, RETAINED_EARNINGS_ACCOUNT};
pub use balance::{AccountBalance, NormalSide};
pub use error::LedgerError;
pub use posting::{PostingResult, PostingService};
pub use trial_balance::{TrialBalanceBuilder, TrialBalanceEntry, TrialBalanceTotals};
pub use types::{
    CashFlowBucket, Classification, EventTotals, EventType, JournalDelta, PostedEntry,
    StatementEvent,
};
pub use validation::{LedgerValidationError, event_totals, validate_event};
