//! Income statement extraction.

use hotelbooks_shared::types::RoundingPolicy;

use super::types::{IncomeStatementLine, PeriodIncomeStatement};
use crate::fiscal::Period;
use crate::ledger::{AccountRegistry, Classification, PostedEntry, TrialBalanceBuilder, TrialBalanceEntry};

/// Extracts period income statements.
pub struct IncomeStatementExtractor;

impl IncomeStatementExtractor {
    /// Income statement for the entries posted in `period`.
    #[must_use]
    pub fn extract(
        entries: &[PostedEntry],
        period: Period,
        registry: &AccountRegistry,
        rounding: RoundingPolicy,
    ) -> PeriodIncomeStatement {
        let tb = TrialBalanceBuilder::trial_balance(entries, period, registry, rounding);
        Self::from_trial_balance(&tb, period, registry, rounding)
    }

    /// Income statement from an already built period trial balance.
    ///
    /// Only accounts the registry classifies as revenue or expense count.
    #[must_use]
    pub fn from_trial_balance(
        trial_balance: &[TrialBalanceEntry],
        period: Period,
        registry: &AccountRegistry,
        rounding: RoundingPolicy,
    ) -> PeriodIncomeStatement {
        let mut revenue_accounts = Vec::new();
        let mut expense_accounts = Vec::new();

        for row in trial_balance {
            let line = IncomeStatementLine {
                account: row.account.clone(),
                amount: rounding.round(row.balance),
            };
            match registry.classification(&row.account) {
                Some(Classification::IsRevenue) => revenue_accounts.push(line),
                Some(Classification::IsExpense) => expense_accounts.push(line),
                _ => {}
            }
        }

        let total_revenue = rounding.sum(revenue_accounts.iter().map(|l| l.amount));
        let total_expenses = rounding.sum(expense_accounts.iter().map(|l| l.amount));

        PeriodIncomeStatement {
            period,
            revenue_accounts,
            expense_accounts,
            total_revenue,
            total_expenses,
            net_income: rounding.round(total_revenue - total_expenses),
        }
    }
}
