//! Account balance calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Classification;

/// The side on which an account's natural positive balance sits.
///
/// - Asset/Deferred/Expense: balance = debit - credit (debit-normal)
/// - Liability/Equity/Revenue: balance = credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NormalSide {
    /// Debit-normal accounts. Unknown accounts fall back to this side.
    #[default]
    Debit,
    /// Credit-normal accounts.
    Credit,
}

impl NormalSide {
    /// The conventional normal side for a classification.
    #[must_use]
    pub const fn for_classification(classification: Classification) -> Self {
        match classification {
            Classification::BsAsset | Classification::BsDeferred | Classification::IsExpense => {
                Self::Debit
            }
            Classification::BsLiability | Classification::BsEquity | Classification::IsRevenue => {
                Self::Credit
            }
        }
    }

    /// Calculates the signed balance for debit and credit totals.
    #[must_use]
    pub fn balance(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Running debit and credit totals for one account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
}

impl AccountBalance {
    /// Creates an empty balance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one posting line.
    pub fn add(&mut self, debit: Decimal, credit: Decimal) {
        self.debit_total += debit;
        self.credit_total += credit;
    }

    /// Net balance on the given normal side.
    #[must_use]
    pub fn balance(&self, side: NormalSide) -> Decimal {
        side.balance(self.debit_total, self.credit_total)
    }
}
