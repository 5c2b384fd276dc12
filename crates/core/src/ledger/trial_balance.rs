//! Trial balance aggregation over posted entries.

use std::collections::BTreeMap;

use hotelbooks_shared::types::{RoundingPolicy, within_tolerance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accounts::AccountRegistry;
use super::balance::AccountBalance;
use super::types::PostedEntry;
use crate::fiscal::Period;

/// Per-account row of a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceEntry {
    /// Account code.
    pub account: String,
    /// Total debits.
    pub debit_total: Decimal,
    /// Total credits.
    pub credit_total: Decimal,
    /// Balance on the account's normal side.
    pub balance: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Whether debits equal credits within tolerance.
    pub is_balanced: bool,
}

/// Builds trial balances.
pub struct TrialBalanceBuilder;

impl TrialBalanceBuilder {
    /// Trial balance of the entries posted in exactly `period`.
    #[must_use]
    pub fn trial_balance(
        entries: &[PostedEntry],
        period: Period,
        registry: &AccountRegistry,
        rounding: RoundingPolicy,
    ) -> Vec<TrialBalanceEntry> {
        Self::build(
            entries.iter().filter(|e| e.period == period),
            registry,
            rounding,
        )
    }

    /// Trial balance of every entry posted up to and including `through`.
    #[must_use]
    pub fn cumulative_trial_balance(
        entries: &[PostedEntry],
        through: Period,
        registry: &AccountRegistry,
        rounding: RoundingPolicy,
    ) -> Vec<TrialBalanceEntry> {
        Self::build(
            entries.iter().filter(|e| e.period <= through),
            registry,
            rounding,
        )
    }

    /// Sums the debit and credit columns of a trial balance.
    #[must_use]
    pub fn totals(rows: &[TrialBalanceEntry]) -> TrialBalanceTotals {
        let total_debit: Decimal = rows.iter().map(|r| r.debit_total).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit_total).sum();
        TrialBalanceTotals {
            total_debit,
            total_credit,
            is_balanced: within_tolerance(total_debit, total_credit),
        }
    }

    fn build<'a, I>(
        entries: I,
        registry: &AccountRegistry,
        rounding: RoundingPolicy,
    ) -> Vec<TrialBalanceEntry>
    where
        I: Iterator<Item = &'a PostedEntry>,
    {
        let mut by_account: BTreeMap<&str, AccountBalance> = BTreeMap::new();
        for entry in entries {
            by_account
                .entry(entry.account.as_str())
                .or_default()
                .add(entry.debit, entry.credit);
        }

        by_account
            .into_iter()
            .map(|(account, totals)| TrialBalanceEntry {
                account: account.to_string(),
                debit_total: rounding.round(totals.debit_total),
                credit_total: rounding.round(totals.credit_total),
                balance: rounding.round(totals.balance(registry.normal_side(account))),
            })
            .collect()
    }
}
