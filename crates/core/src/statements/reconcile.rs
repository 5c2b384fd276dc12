//! Cross-statement reconciliation.

use hotelbooks_shared::types::RoundingPolicy;
use rust_decimal::Decimal;
use tracing::warn;

use super::cash_flow::CashFlowExtractor;
use super::types::{
    CheckKind, PeriodBalanceSheet, PeriodCashFlow, PeriodIncomeStatement, ReconciliationCheck,
    ReconciliationReport,
};
use crate::ledger::{AccountRegistry, PostedEntry};

/// Runs tie-out checks across a set of statements.
pub struct Reconciler;

impl Reconciler {
    /// Evaluates every check; one failure never stops the others.
    ///
    /// - `BS_BALANCE` per balance sheet: assets against liabilities plus equity
    /// - `CF_TIEOUT` per cash flow: net cash change against the cash account delta
    /// - `IS_TO_RE` per income statement with a balance sheet for the same
    ///   period: running net income against the retained earnings line
    #[must_use]
    pub fn reconcile(
        entries: &[PostedEntry],
        income_statements: &[PeriodIncomeStatement],
        balance_sheets: &[PeriodBalanceSheet],
        cash_flows: &[PeriodCashFlow],
        registry: &AccountRegistry,
        rounding: RoundingPolicy,
    ) -> ReconciliationReport {
        let mut checks = Vec::with_capacity(
            balance_sheets.len() + cash_flows.len() + income_statements.len(),
        );

        for bs in balance_sheets {
            checks.push(ReconciliationCheck::new(
                CheckKind::BsBalance,
                bs.period,
                rounding.round(bs.total_assets),
                rounding.round(bs.liabilities_and_equity()),
            ));
        }

        for cf in cash_flows {
            let cash_delta = CashFlowExtractor::cash_delta(entries, cf.period, registry, rounding);
            checks.push(ReconciliationCheck::new(
                CheckKind::CfTieout,
                cf.period,
                rounding.round(cf.net_cash_change),
                cash_delta,
            ));
        }

        let retained_earnings = registry.retained_earnings_account();
        let mut cumulative_net_income = Decimal::ZERO;
        for is in income_statements {
            cumulative_net_income = rounding.round(cumulative_net_income + is.net_income);
            let Some(bs) = balance_sheets.iter().find(|b| b.period == is.period) else {
                continue;
            };
            let re_balance = bs
                .equity_line(retained_earnings)
                .map_or(Decimal::ZERO, |line| line.balance);
            checks.push(ReconciliationCheck::new(
                CheckKind::IsToRe,
                is.period,
                cumulative_net_income,
                rounding.round(re_balance),
            ));
        }

        let report = ReconciliationReport::new(checks);
        for failed in report.failures() {
            warn!(
                check = %failed.check,
                period = %failed.period,
                expected = %failed.expected,
                actual = %failed.actual,
                variance = %failed.variance,
                "Reconciliation check failed"
            );
        }
        report
    }
}
