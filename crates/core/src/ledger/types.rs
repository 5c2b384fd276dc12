//! Ledger domain types for events and postings.
//!
//! Events and their journal deltas are produced upstream by the financing,
//! funding and refinance calculators and arrive here as an immutable batch.
//! Posted entries are the only records the engine itself creates.

use std::fmt;

use chrono::NaiveDate;
use hotelbooks_shared::types::{EntityId, EventId, TOLERANCE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::Period;

/// Statement classification of an account or journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// Balance sheet asset.
    BsAsset,
    /// Balance sheet liability.
    BsLiability,
    /// Balance sheet equity.
    BsEquity,
    /// Deferred cost carried as an asset (e.g. closing costs).
    BsDeferred,
    /// Income statement revenue.
    IsRevenue,
    /// Income statement expense.
    IsExpense,
}

impl Classification {
    /// Returns true for balance sheet classifications.
    #[must_use]
    pub const fn is_balance_sheet(&self) -> bool {
        matches!(
            self,
            Self::BsAsset | Self::BsLiability | Self::BsEquity | Self::BsDeferred
        )
    }

    /// Returns true for income statement classifications.
    #[must_use]
    pub const fn is_income_statement(&self) -> bool {
        matches!(self, Self::IsRevenue | Self::IsExpense)
    }
}

/// Cash flow statement section a journal line is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashFlowBucket {
    /// Cash from operations (interest, fees).
    Operating,
    /// Cash from investing (acquisitions, dispositions).
    Investing,
    /// Cash from financing (equity, debt proceeds and repayments).
    Financing,
}

/// Kind of business occurrence that produced an event.
///
/// Known kinds get their own variant; anything else is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// Equity funding tranche.
    Funding,
    /// Property acquisition.
    Acquisition,
    /// Refinancing of existing debt.
    Refinance,
    /// Disposition of a property.
    Exit,
    /// Scheduled interest and principal.
    DebtService,
    /// Periodic depreciation.
    Depreciation,
    /// Any other event type, kept as given.
    Other(String),
}

impl EventType {
    /// Returns the wire name of this event type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Funding => "FUNDING",
            Self::Acquisition => "ACQUISITION",
            Self::Refinance => "REFINANCE",
            Self::Exit => "EXIT",
            Self::DebtService => "DEBT_SERVICE",
            Self::Depreciation => "DEPRECIATION",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "FUNDING" => Self::Funding,
            "ACQUISITION" => Self::Acquisition,
            "REFINANCE" => Self::Refinance,
            "EXIT" => Self::Exit,
            "DEBT_SERVICE" => Self::DebtService,
            "DEPRECIATION" => Self::Depreciation,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a journal entry as produced by an upstream calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalDelta {
    /// Account code.
    pub account: String,
    /// Debit amount (non-negative).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (non-negative).
    #[serde(default)]
    pub credit: Decimal,
    /// Statement classification.
    pub classification: Classification,
    /// Cash flow section, `None` for non-cash lines such as accruals.
    #[serde(default)]
    pub cash_flow_bucket: Option<CashFlowBucket>,
    /// Display-only description.
    #[serde(default)]
    pub memo: String,
}

impl JournalDelta {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(
        account: impl Into<String>,
        amount: Decimal,
        classification: Classification,
        cash_flow_bucket: Option<CashFlowBucket>,
    ) -> Self {
        Self {
            account: account.into(),
            debit: amount,
            credit: Decimal::ZERO,
            classification,
            cash_flow_bucket,
            memo: String::new(),
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(
        account: impl Into<String>,
        amount: Decimal,
        classification: Classification,
        cash_flow_bucket: Option<CashFlowBucket>,
    ) -> Self {
        Self {
            account: account.into(),
            debit: Decimal::ZERO,
            credit: amount,
            classification,
            cash_flow_bucket,
            memo: String::new(),
        }
    }

    /// Sets the memo.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }
}

/// A business occurrence carrying the journal lines it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementEvent {
    /// Unique event identifier.
    pub event_id: EventId,
    /// Kind of event.
    pub event_type: EventType,
    /// Date the event takes effect.
    pub date: NaiveDate,
    /// Legal entity the event affects.
    pub entity_id: EntityId,
    /// Journal lines, in the order the calculator produced them.
    #[serde(default)]
    pub journal_deltas: Vec<JournalDelta>,
}

impl StatementEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(
        event_id: impl Into<EventId>,
        event_type: impl Into<EventType>,
        date: NaiveDate,
        entity_id: impl Into<EntityId>,
        journal_deltas: Vec<JournalDelta>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            event_type: event_type.into(),
            date,
            entity_id: entity_id.into(),
            journal_deltas,
        }
    }

    /// Reporting period the event posts into.
    #[must_use]
    pub fn period(&self) -> Period {
        Period::from_date(self.date)
    }
}

/// A journal line materialized into the ledger.
///
/// Amounts are already rounded per the posting policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedEntry {
    /// Period derived from the event date.
    pub period: Period,
    /// Event this line came from.
    pub event_id: EventId,
    /// Account code.
    pub account: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Classification as tagged upstream.
    pub classification: Classification,
    /// Cash flow section, if any.
    pub cash_flow_bucket: Option<CashFlowBucket>,
    /// Display-only description.
    pub memo: String,
}

/// Debit and credit sums of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTotals {
    /// Sum of rounded debits.
    pub debit: Decimal,
    /// Sum of rounded credits.
    pub credit: Decimal,
    /// Whether the sums agree within tolerance.
    pub is_balanced: bool,
}

impl EventTotals {
    /// Creates event totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit
                .checked_sub(credit)
                .is_some_and(|diff| diff.abs() < TOLERANCE),
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    ///
    /// Saturates at the bounds of `Decimal`.
    pub fn difference(&self) -> Decimal {
        self.debit.saturating_sub(self.credit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_classification_groups() {
        assert!(Classification::BsAsset.is_balance_sheet());
        assert!(Classification::BsDeferred.is_balance_sheet());
        assert!(!Classification::BsEquity.is_income_statement());
        assert!(Classification::IsRevenue.is_income_statement());
        assert!(Classification::IsExpense.is_income_statement());
        assert!(!Classification::IsExpense.is_balance_sheet());
    }

    #[test]
    fn test_classification_wire_names() {
        assert_eq!(
            serde_json::to_string(&Classification::BsDeferred).unwrap(),
            r#""BS_DEFERRED""#
        );
        let cls: Classification = serde_json::from_str(r#""IS_REVENUE""#).unwrap();
        assert_eq!(cls, Classification::IsRevenue);
        assert!(serde_json::from_str::<Classification>(r#""OFF_BOOK""#).is_err());
    }

    #[test]
    fn test_event_type_known_and_open() {
        assert_eq!(EventType::from("FUNDING"), EventType::Funding);
        assert_eq!(EventType::from("DEBT_SERVICE"), EventType::DebtService);
        assert_eq!(
            EventType::from("CAPEX_DRAW"),
            EventType::Other("CAPEX_DRAW".to_string())
        );
        assert_eq!(EventType::Other("CAPEX_DRAW".into()).to_string(), "CAPEX_DRAW");
        assert_eq!(String::from(EventType::Refinance), "REFINANCE");
    }

    #[test]
    fn test_event_type_serde_round_trip_keeps_unknown_names() {
        let json = serde_json::to_string(&EventType::from("DISTRIBUTION")).unwrap();
        assert_eq!(json, r#""DISTRIBUTION""#);
        let back: EventType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EventType::Other("DISTRIBUTION".to_string()));
    }

    #[test]
    fn test_event_deserializes_from_calculator_json() {
        let json = r#"{
            "event_id": "funding_1",
            "event_type": "FUNDING",
            "date": "2026-06-01",
            "entity_id": "opco",
            "journal_deltas": [
                {"account": "CASH", "debit": "1000000", "credit": "0",
                 "classification": "BS_ASSET", "cash_flow_bucket": "FINANCING",
                 "memo": "Funding tranche cash inflow"},
                {"account": "EQUITY_CONTRIBUTED", "credit": "1000000",
                 "classification": "BS_EQUITY", "cash_flow_bucket": null}
            ]
        }"#;
        let event: StatementEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_id, EventId::new("funding_1"));
        assert_eq!(event.event_type, EventType::Funding);
        assert_eq!(event.period().to_string(), "2026-06");
        assert_eq!(event.journal_deltas.len(), 2);
        assert_eq!(event.journal_deltas[0].debit, dec!(1000000));
        assert_eq!(event.journal_deltas[1].debit, Decimal::ZERO);
        assert_eq!(event.journal_deltas[1].cash_flow_bucket, None);
        assert_eq!(event.journal_deltas[1].memo, "");
    }

    #[test]
    fn test_delta_constructors() {
        let d = JournalDelta::debit("CASH", dec!(10), Classification::BsAsset, None).with_memo("x");
        assert_eq!(d.debit, dec!(10));
        assert_eq!(d.credit, Decimal::ZERO);
        assert_eq!(d.memo, "x");

        let c = JournalDelta::credit(
            "DEBT_NEW",
            dec!(10),
            Classification::BsLiability,
            Some(CashFlowBucket::Financing),
        );
        assert_eq!(c.debit, Decimal::ZERO);
        assert_eq!(c.credit, dec!(10));
    }

    #[test]
    fn test_event_totals_balanced_within_tolerance() {
        let totals = EventTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);

        let totals = EventTotals::new(dec!(100.000), dec!(100.009));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_event_totals_unbalanced() {
        let totals = EventTotals::new(dec!(1000000), dec!(999000));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(1000));

        let totals = EventTotals::new(dec!(100.00), dec!(100.01));
        assert!(!totals.is_balanced);
    }
}
