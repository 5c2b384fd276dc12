//! Property-based tests for posting and trial balances.
//!
//! - Every posted event balances within one cent
//! - Posting partitions the input: each event is rejected or fully posted
//! - Trial balances are sorted by account and balance for balanced postings

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use hotelbooks_shared::types::{RoundingPolicy, within_tolerance};

use super::accounts::AccountRegistry;
use super::posting::PostingService;
use super::trial_balance::TrialBalanceBuilder;
use super::types::{CashFlowBucket, Classification, JournalDelta, StatementEvent};
use crate::fiscal::Period;

/// Strategy to generate positive amounts (0.01 to 100,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a debit-side account from the standard chart.
fn debit_account() -> impl Strategy<Value = (&'static str, Classification)> {
    prop_oneof![
        Just(("CASH", Classification::BsAsset)),
        Just(("PROPERTY", Classification::BsAsset)),
        Just(("CLOSING_COSTS", Classification::BsDeferred)),
        Just(("INTEREST_EXPENSE", Classification::IsExpense)),
    ]
}

/// Strategy to generate a credit-side account from the standard chart.
fn credit_account() -> impl Strategy<Value = (&'static str, Classification)> {
    prop_oneof![
        Just(("EQUITY_CONTRIBUTED", Classification::BsEquity)),
        Just(("DEBT_ACQUISITION", Classification::BsLiability)),
        Just(("DEBT_NEW", Classification::BsLiability)),
        Just(("CASH", Classification::BsAsset)),
    ]
}

/// Debit lines, credit account, month and credit skew in cents.
type RawEvent = (
    Vec<(String, Decimal, Classification)>,
    (String, Classification),
    u32,
    i64,
);

/// Strategy to generate an event whose credit line is off by `skew` cents.
fn event_strategy() -> impl Strategy<Value = RawEvent> {
    (
        prop::collection::vec((debit_account(), positive_amount()), 1..5),
        credit_account(),
        1u32..=12,
        prop_oneof![3 => Just(0i64), 1 => 1i64..100_000i64],
    )
        .prop_map(|(debits, credit, month, skew)| {
            let debits = debits
                .into_iter()
                .map(|((acct, cls), amt)| (acct.to_string(), amt, cls))
                .collect();
            (debits, (credit.0.to_string(), credit.1), month, skew)
        })
}

fn build_event(
    index: usize,
    debits: Vec<(String, Decimal, Classification)>,
    credit: (String, Classification),
    month: u32,
    skew: i64,
) -> StatementEvent {
    let total: Decimal = debits.iter().map(|(_, amt, _)| *amt).sum();
    let mut deltas: Vec<JournalDelta> = debits
        .into_iter()
        .map(|(acct, amt, cls)| JournalDelta::debit(acct, amt, cls, Some(CashFlowBucket::Operating)))
        .collect();
    deltas.push(JournalDelta::credit(
        credit.0,
        total + Decimal::new(skew, 2),
        credit.1,
        Some(CashFlowBucket::Financing),
    ));
    StatementEvent::new(
        format!("evt_{index}"),
        "DEBT_SERVICE",
        NaiveDate::from_ymd_opt(2026, month, 15).unwrap(),
        "opco",
        deltas,
    )
}

fn events_strategy() -> impl Strategy<Value = Vec<StatementEvent>> {
    prop::collection::vec(event_strategy(), 0..12).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (debits, credit, month, skew))| build_event(i, debits, credit, month, skew))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Each posted event's debits equal its credits within tolerance.
    #[test]
    fn prop_posted_events_balance(events in events_strategy()) {
        let result = PostingService::post(&events, RoundingPolicy::cents());

        for event in &events {
            let lines: Vec<_> = result
                .entries
                .iter()
                .filter(|e| e.event_id == event.event_id)
                .collect();
            if lines.is_empty() {
                continue;
            }
            let debit: Decimal = lines.iter().map(|e| e.debit).sum();
            let credit: Decimal = lines.iter().map(|e| e.credit).sum();
            prop_assert!(within_tolerance(debit, credit));
        }
    }

    /// Every event is either rejected or has all of its lines posted.
    #[test]
    fn prop_posting_partitions_input(events in events_strategy()) {
        let result = PostingService::post(&events, RoundingPolicy::cents());

        for event in &events {
            let posted = result
                .entries
                .iter()
                .filter(|e| e.event_id == event.event_id)
                .count();
            let rejected = result.unbalanced_events.contains(&event.event_id);
            if rejected {
                prop_assert_eq!(posted, 0);
            } else {
                prop_assert_eq!(posted, event.journal_deltas.len());
            }
        }
        let expected_rejections = events
            .iter()
            .filter(|e| {
                let d: Decimal = e.journal_deltas.iter().map(|l| l.debit).sum();
                let c: Decimal = e.journal_deltas.iter().map(|l| l.credit).sum();
                !within_tolerance(d, c)
            })
            .count();
        prop_assert_eq!(result.unbalanced_events.len(), expected_rejections);
    }

    /// Cumulative trial balances are sorted and their columns agree.
    #[test]
    fn prop_trial_balance_sorted_and_balanced(events in events_strategy()) {
        let registry = AccountRegistry::standard();
        let result = PostingService::post(&events, RoundingPolicy::cents());
        let through = Period::new(2026, 12).unwrap();

        let tb = TrialBalanceBuilder::cumulative_trial_balance(
            &result.entries,
            through,
            &registry,
            RoundingPolicy::cents(),
        );
        prop_assert!(tb.windows(2).all(|w| w[0].account < w[1].account));

        let totals = TrialBalanceBuilder::totals(&tb);
        prop_assert!(totals.is_balanced);
    }
}
