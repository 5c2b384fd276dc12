//! Statement data types.
//!
//! Every statement here is a derived projection of posted entries. None of
//! them is stored or mutated after it is built.

use std::collections::BTreeMap;
use std::fmt;

use hotelbooks_shared::types::{EventId, TOLERANCE, variance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::Period;
use crate::ledger::{PostedEntry, TrialBalanceEntry};

/// Income statement line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementLine {
    /// Account code.
    pub account: String,
    /// Normal-side balance for the period.
    pub amount: Decimal,
}

/// Income statement for a single period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodIncomeStatement {
    /// Reporting period.
    pub period: Period,
    /// Revenue accounts.
    pub revenue_accounts: Vec<IncomeStatementLine>,
    /// Expense accounts.
    pub expense_accounts: Vec<IncomeStatementLine>,
    /// Total revenue.
    pub total_revenue: Decimal,
    /// Total expenses.
    pub total_expenses: Decimal,
    /// Revenue less expenses.
    pub net_income: Decimal,
}

/// Balance sheet line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetLine {
    /// Account code.
    pub account: String,
    /// Cumulative normal-side balance.
    pub balance: Decimal,
}

/// Balance sheet as of the end of a period.
///
/// Cumulative: includes every entry posted up to and including `period`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBalanceSheet {
    /// Reporting period.
    pub period: Period,
    /// Asset and deferred cost accounts.
    pub assets: Vec<BalanceSheetLine>,
    /// Liability accounts.
    pub liabilities: Vec<BalanceSheetLine>,
    /// Equity accounts, retained earnings included.
    pub equity: Vec<BalanceSheetLine>,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity.
    pub total_equity: Decimal,
    /// Whether assets equal liabilities plus equity within tolerance.
    pub balanced: bool,
}

impl PeriodBalanceSheet {
    /// Liabilities plus equity.
    #[must_use]
    pub fn liabilities_and_equity(&self) -> Decimal {
        self.total_liabilities + self.total_equity
    }

    /// Looks up an equity line by account code.
    #[must_use]
    pub fn equity_line(&self, account: &str) -> Option<&BalanceSheetLine> {
        self.equity.iter().find(|line| line.account == account)
    }
}

/// Cash flow statement for a single period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCashFlow {
    /// Reporting period.
    pub period: Period,
    /// Cash from operations.
    pub operating: Decimal,
    /// Cash from investing.
    pub investing: Decimal,
    /// Cash from financing.
    pub financing: Decimal,
    /// Sum of the three sections.
    pub net_cash_change: Decimal,
}

/// Kind of reconciliation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckKind {
    /// Assets equal liabilities plus equity.
    BsBalance,
    /// Net cash flow equals the change in the cash account.
    CfTieout,
    /// Cumulative net income equals the retained earnings line.
    IsToRe,
}

impl CheckKind {
    /// Accounting standard the check enforces.
    #[must_use]
    pub const fn reference(&self) -> &'static str {
        match self {
            Self::BsBalance | Self::IsToRe => "FASB",
            Self::CfTieout => "ASC 230",
        }
    }

    /// Wire name of the check.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BsBalance => "BS_BALANCE",
            Self::CfTieout => "CF_TIEOUT",
            Self::IsToRe => "IS_TO_RE",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one reconciliation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationCheck {
    /// Which check ran.
    pub check: CheckKind,
    /// Period checked.
    pub period: Period,
    /// Whether the variance is under tolerance.
    pub passed: bool,
    /// Expected amount.
    pub expected: Decimal,
    /// Actual amount.
    pub actual: Decimal,
    /// Absolute difference between expected and actual.
    pub variance: Decimal,
    /// Accounting standard reference.
    pub gaap_ref: String,
}

impl ReconciliationCheck {
    /// Evaluates a check from its expected and actual amounts.
    #[must_use]
    pub fn new(check: CheckKind, period: Period, expected: Decimal, actual: Decimal) -> Self {
        let variance = variance(expected, actual);
        Self {
            check,
            period,
            passed: variance < TOLERANCE,
            expected,
            actual,
            variance,
            gaap_ref: check.reference().to_string(),
        }
    }
}

/// All reconciliation checks of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Checks in evaluation order.
    pub checks: Vec<ReconciliationCheck>,
    /// Whether every check passed.
    pub all_passed: bool,
}

impl ReconciliationReport {
    /// Builds a report, rolling up `all_passed`.
    #[must_use]
    pub fn new(checks: Vec<ReconciliationCheck>) -> Self {
        let all_passed = checks.iter().all(|c| c.passed);
        Self { checks, all_passed }
    }

    /// Checks that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ReconciliationCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl Default for ReconciliationReport {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Posting problems surfaced alongside the statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingFlags {
    /// Ids of events rejected as unbalanced.
    pub unbalanced_events: Vec<EventId>,
    /// Whether any event was rejected.
    pub has_posting_errors: bool,
}

/// Everything one run of the engine produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementOutput {
    /// Ledger entries posted from balanced events.
    pub posted_entries: Vec<PostedEntry>,
    /// Periods that received postings, ascending.
    pub periods: Vec<Period>,
    /// Period-only trial balance for each period.
    pub trial_balances: BTreeMap<Period, Vec<TrialBalanceEntry>>,
    /// One income statement per period.
    pub income_statements: Vec<PeriodIncomeStatement>,
    /// One cumulative balance sheet per period.
    pub balance_sheets: Vec<PeriodBalanceSheet>,
    /// One cash flow statement per period.
    pub cash_flows: Vec<PeriodCashFlow>,
    /// Tie-out checks across the statements.
    pub reconciliation: ReconciliationReport,
    /// Posting problems.
    pub flags: PostingFlags,
}
