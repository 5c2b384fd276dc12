//! Ledger error types for reference data and period parsing.
//!
//! Posting itself never fails: an unbalanced event is data on the posting
//! result, not an error. These variants cover the inputs around posting,
//! namely the chart of accounts and period strings.

use thiserror::Error;

/// Errors that can occur while building ledger reference data.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Two account definitions share a code.
    #[error("Duplicate account code in chart of accounts: {0}")]
    DuplicateAccount(String),

    /// An account definition has an empty code.
    #[error("Account code cannot be empty")]
    EmptyAccountCode,

    /// A chart of accounts could not be parsed.
    #[error("Invalid chart of accounts: {0}")]
    InvalidChart(String),

    /// A period string is not of the form `YYYY-MM`.
    #[error("Invalid period '{0}', expected YYYY-MM")]
    InvalidPeriod(String),
}

impl LedgerError {
    /// Returns the error code for structured output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateAccount(_) => "DUPLICATE_ACCOUNT",
            Self::EmptyAccountCode => "EMPTY_ACCOUNT_CODE",
            Self::InvalidChart(_) => "INVALID_CHART",
            Self::InvalidPeriod(_) => "INVALID_PERIOD",
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidChart(err.to_string())
    }
}
