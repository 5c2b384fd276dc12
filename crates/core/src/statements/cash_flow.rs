//! Cash flow extraction.
//!
//! Cash impact is read from the cash account alone: a debit to cash is an
//! inflow and a credit an outflow, reported under the bucket the line was
//! tagged with. The non-cash side of an entry carries no cash impact.

use hotelbooks_shared::types::RoundingPolicy;
use rust_decimal::Decimal;

use super::types::PeriodCashFlow;
use crate::fiscal::Period;
use crate::ledger::{AccountRegistry, CashFlowBucket, PostedEntry};

/// Extracts period cash flow statements.
pub struct CashFlowExtractor;

impl CashFlowExtractor {
    /// Cash flow statement for the entries posted in `period`.
    ///
    /// Cash postings without a bucket are left out of all three sections;
    /// they still move [`Self::cash_delta`], which is what the tie-out
    /// check catches.
    #[must_use]
    pub fn extract(
        entries: &[PostedEntry],
        period: Period,
        registry: &AccountRegistry,
        rounding: RoundingPolicy,
    ) -> PeriodCashFlow {
        let mut operating = Decimal::ZERO;
        let mut investing = Decimal::ZERO;
        let mut financing = Decimal::ZERO;

        for entry in Self::cash_entries(entries, period, registry) {
            let impact = entry.debit - entry.credit;
            match entry.cash_flow_bucket {
                Some(CashFlowBucket::Operating) => operating += impact,
                Some(CashFlowBucket::Investing) => investing += impact,
                Some(CashFlowBucket::Financing) => financing += impact,
                None => {}
            }
        }

        let operating = rounding.round(operating);
        let investing = rounding.round(investing);
        let financing = rounding.round(financing);

        PeriodCashFlow {
            period,
            operating,
            investing,
            financing,
            net_cash_change: rounding.round(operating + investing + financing),
        }
    }

    /// Change in the cash account over `period`, ignoring bucket tags.
    #[must_use]
    pub fn cash_delta(
        entries: &[PostedEntry],
        period: Period,
        registry: &AccountRegistry,
        rounding: RoundingPolicy,
    ) -> Decimal {
        let delta: Decimal = Self::cash_entries(entries, period, registry)
            .map(|e| e.debit - e.credit)
            .sum();
        rounding.round(delta)
    }

    fn cash_entries<'a>(
        entries: &'a [PostedEntry],
        period: Period,
        registry: &'a AccountRegistry,
    ) -> impl Iterator<Item = &'a PostedEntry> {
        let cash = registry.cash_account();
        entries
            .iter()
            .filter(move |e| e.period == period && e.account == cash)
    }
}
