//! Chart of accounts.
//!
//! The registry is the authoritative source of an account's normal side and
//! statement classification. Delta-level classification tags are carried on
//! posted entries for audit, but statements group by what the registry says.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::balance::NormalSide;
use super::error::LedgerError;
use super::types::Classification;

/// Default cash account code.
pub const CASH_ACCOUNT: &str = "CASH";

/// Default retained earnings account code.
pub const RETAINED_EARNINGS_ACCOUNT: &str = "RETAINED_EARNINGS";

/// One account in the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDefinition {
    /// Unique account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Side on which the account's balance is positive.
    pub normal_side: NormalSide,
    /// Statement the account reports on.
    pub classification: Classification,
}

impl AccountDefinition {
    /// Creates a definition whose normal side follows its classification.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        classification: Classification,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            normal_side: NormalSide::for_classification(classification),
            classification,
        }
    }
}

/// Lookup table from account code to definition.
#[derive(Debug, Clone)]
pub struct AccountRegistry {
    accounts: HashMap<String, AccountDefinition>,
    cash_account: String,
    retained_earnings_account: String,
}

impl AccountRegistry {
    /// Builds a registry from a list of definitions.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::EmptyAccountCode` or
    /// `LedgerError::DuplicateAccount` for a malformed chart.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = AccountDefinition>,
    {
        let mut accounts = HashMap::new();
        for def in definitions {
            if def.code.trim().is_empty() {
                return Err(LedgerError::EmptyAccountCode);
            }
            if accounts.contains_key(&def.code) {
                return Err(LedgerError::DuplicateAccount(def.code));
            }
            accounts.insert(def.code.clone(), def);
        }

        Ok(Self {
            accounts,
            cash_account: CASH_ACCOUNT.to_string(),
            retained_earnings_account: RETAINED_EARNINGS_ACCOUNT.to_string(),
        })
    }

    /// Parses a JSON array of account definitions.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidChart` if the JSON is malformed, or any
    /// error [`Self::from_definitions`] returns.
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        let definitions: Vec<AccountDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// The hotel portfolio chart used by the financing calculators.
    #[must_use]
    pub fn standard() -> Self {
        use Classification::{BsAsset, BsDeferred, BsEquity, BsLiability, IsExpense};

        let chart = [
            ("CASH", "Cash", BsAsset),
            ("PROPERTY", "Property", BsAsset),
            ("RESERVES", "Reserves", BsAsset),
            ("CLOSING_COSTS", "Closing Costs", BsDeferred),
            ("DEBT_ACQUISITION", "Acquisition Debt", BsLiability),
            ("DEBT_NEW", "New Debt (Refinance)", BsLiability),
            ("DEBT_OLD", "Old Debt (Pre-Refinance)", BsLiability),
            ("ACCRUED_INTEREST_PAYABLE", "Accrued Interest Payable", BsLiability),
            ("EQUITY_CONTRIBUTED", "Contributed Equity", BsEquity),
            ("RETAINED_EARNINGS", "Retained Earnings", BsEquity),
            ("INTEREST_EXPENSE", "Interest Expense", IsExpense),
            ("DEPRECIATION_EXPENSE", "Depreciation Expense", IsExpense),
            ("PREPAYMENT_PENALTY_EXPENSE", "Prepayment Penalty Expense", IsExpense),
        ];

        let accounts = chart
            .into_iter()
            .map(|(code, name, cls)| (code.to_string(), AccountDefinition::new(code, name, cls)))
            .collect();

        Self {
            accounts,
            cash_account: CASH_ACCOUNT.to_string(),
            retained_earnings_account: RETAINED_EARNINGS_ACCOUNT.to_string(),
        }
    }

    /// Overrides the account the cash flow statement reads.
    #[must_use]
    pub fn with_cash_account(mut self, code: impl Into<String>) -> Self {
        self.cash_account = code.into();
        self
    }

    /// Overrides the account net income rolls into.
    #[must_use]
    pub fn with_retained_earnings_account(mut self, code: impl Into<String>) -> Self {
        self.retained_earnings_account = code.into();
        self
    }

    /// Looks up an account definition.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&AccountDefinition> {
        self.accounts.get(code)
    }

    /// Returns true if the account is in the chart.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.accounts.contains_key(code)
    }

    /// Normal side of an account. Unknown accounts are treated as debit-normal.
    #[must_use]
    pub fn normal_side(&self, code: &str) -> NormalSide {
        self.get(code).map(|d| d.normal_side).unwrap_or_default()
    }

    /// Classification of an account, `None` if unknown.
    #[must_use]
    pub fn classification(&self, code: &str) -> Option<Classification> {
        self.get(code).map(|d| d.classification)
    }

    /// Cash account code.
    #[must_use]
    pub fn cash_account(&self) -> &str {
        &self.cash_account
    }

    /// Retained earnings account code.
    #[must_use]
    pub fn retained_earnings_account(&self) -> &str {
        &self.retained_earnings_account
    }

    /// Number of accounts in the chart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
