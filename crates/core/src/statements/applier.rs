//! Event applier: events in, reconciled statements out.

use std::collections::{BTreeMap, BTreeSet};

use hotelbooks_shared::types::RoundingPolicy;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::balance_sheet::BalanceSheetExtractor;
use super::cash_flow::CashFlowExtractor;
use super::income::IncomeStatementExtractor;
use super::reconcile::Reconciler;
use super::types::{PostingFlags, StatementOutput};
use crate::fiscal::Period;
use crate::ledger::{AccountRegistry, PostingService, StatementEvent, TrialBalanceBuilder};

/// Applies statement events.
pub struct EventApplier;

impl EventApplier {
    /// Posts `events` and derives every statement for every period they touch.
    ///
    /// Pure: the same events, chart and policy always give the same output.
    #[must_use]
    pub fn apply(
        events: &[StatementEvent],
        registry: &AccountRegistry,
        rounding: RoundingPolicy,
    ) -> StatementOutput {
        let posting = PostingService::post(events, rounding);
        let entries = posting.entries;

        let periods: Vec<Period> = entries
            .iter()
            .map(|e| e.period)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut trial_balances = BTreeMap::new();
        let mut income_statements = Vec::with_capacity(periods.len());
        let mut balance_sheets = Vec::with_capacity(periods.len());
        let mut cash_flows = Vec::with_capacity(periods.len());
        let mut cumulative_net_income = Decimal::ZERO;

        for &period in &periods {
            let tb = TrialBalanceBuilder::trial_balance(&entries, period, registry, rounding);

            let is = IncomeStatementExtractor::from_trial_balance(&tb, period, registry, rounding);
            cumulative_net_income = rounding.round(cumulative_net_income + is.net_income);

            let bs = BalanceSheetExtractor::extract(
                &entries,
                period,
                cumulative_net_income,
                registry,
                rounding,
            );
            let cf = CashFlowExtractor::extract(&entries, period, registry, rounding);

            debug!(
                %period,
                accounts = tb.len(),
                net_income = %is.net_income,
                total_assets = %bs.total_assets,
                net_cash_change = %cf.net_cash_change,
                "Built period statements"
            );

            trial_balances.insert(period, tb);
            income_statements.push(is);
            balance_sheets.push(bs);
            cash_flows.push(cf);
        }

        let reconciliation = Reconciler::reconcile(
            &entries,
            &income_statements,
            &balance_sheets,
            &cash_flows,
            registry,
            rounding,
        );

        info!(
            events = events.len(),
            posted_entries = entries.len(),
            periods = periods.len(),
            rejected_events = posting.unbalanced_events.len(),
            checks = reconciliation.checks.len(),
            all_passed = reconciliation.all_passed,
            "Applied statement events"
        );

        let has_posting_errors = !posting.unbalanced_events.is_empty();
        StatementOutput {
            posted_entries: entries,
            periods,
            trial_balances,
            income_statements,
            balance_sheets,
            cash_flows,
            reconciliation,
            flags: PostingFlags {
                unbalanced_events: posting.unbalanced_events,
                has_posting_errors,
            },
        }
    }
}
