//! Posting service.
//!
//! Turns a batch of statement events into posted entries. Every event is
//! checked on its own; an unbalanced event is rejected whole and recorded on
//! the result, and never stops the rest of the batch from posting.

use hotelbooks_shared::types::{EventId, RoundingPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::{PostedEntry, StatementEvent};
use super::validation::{LedgerValidationError, validate_event};

/// Outcome of posting a batch.
///
/// Every input event is either in `unbalanced_events` or has all of its
/// journal lines in `entries`, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingResult {
    /// Posted entries in input order.
    pub entries: Vec<PostedEntry>,
    /// Ids of rejected events in input order.
    pub unbalanced_events: Vec<EventId>,
}

/// Posting service. Pure, holds no state.
pub struct PostingService;

impl PostingService {
    /// Posts a batch of events.
    ///
    /// Amounts are rounded per the policy before they are summed and again
    /// on the posted entry. Entries carry the period of their event's date.
    #[must_use]
    pub fn post(events: &[StatementEvent], rounding: RoundingPolicy) -> PostingResult {
        let mut result = PostingResult::default();

        for event in events {
            match validate_event(event, rounding) {
                Ok(_) => {
                    let period = event.period();
                    result
                        .entries
                        .extend(event.journal_deltas.iter().map(|delta| PostedEntry {
                            period,
                            event_id: event.event_id.clone(),
                            account: delta.account.clone(),
                            debit: rounding.round(delta.debit),
                            credit: rounding.round(delta.credit),
                            classification: delta.classification,
                            cash_flow_bucket: delta.cash_flow_bucket,
                            memo: delta.memo.clone(),
                        }));
                    debug!(
                        event_id = %event.event_id,
                        event_type = %event.event_type,
                        %period,
                        lines = event.journal_deltas.len(),
                        "Posted event"
                    );
                }
                Err(LedgerValidationError::Unbalanced { debits, credits }) => {
                    warn!(
                        event_id = %event.event_id,
                        event_type = %event.event_type,
                        %debits,
                        %credits,
                        "Rejected unbalanced event"
                    );
                    result.unbalanced_events.push(event.event_id.clone());
                }
                Err(err @ LedgerValidationError::AmountOverflow) => {
                    warn!(
                        event_id = %event.event_id,
                        event_type = %event.event_type,
                        error_code = err.error_code(),
                        "Rejected event with overflowing amounts"
                    );
                    result.unbalanced_events.push(event.event_id.clone());
                }
            }
        }

        result
    }
}
