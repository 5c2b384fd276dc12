//! Balance sheet extraction.
//!
//! The sheet is a cumulative snapshot through the requested period. Income
//! statement accounts never appear on it directly; their cumulative net
//! income is rolled into the retained earnings line instead.

use hotelbooks_shared::types::{RoundingPolicy, within_tolerance};
use rust_decimal::Decimal;
use tracing::warn;

use super::types::{BalanceSheetLine, PeriodBalanceSheet};
use crate::fiscal::Period;
use crate::ledger::{AccountRegistry, Classification, PostedEntry, TrialBalanceBuilder};

/// Extracts period balance sheets.
pub struct BalanceSheetExtractor;

impl BalanceSheetExtractor {
    /// Balance sheet as of the end of `period`.
    ///
    /// `cumulative_net_income` is the running net income through `period`;
    /// it is added to the retained earnings account, or becomes that line
    /// when nothing was posted to it.
    #[must_use]
    pub fn extract(
        entries: &[PostedEntry],
        period: Period,
        cumulative_net_income: Decimal,
        registry: &AccountRegistry,
        rounding: RoundingPolicy,
    ) -> PeriodBalanceSheet {
        let tb = TrialBalanceBuilder::cumulative_trial_balance(entries, period, registry, rounding);
        let retained_earnings = registry.retained_earnings_account();

        let mut assets = Vec::new();
        let mut liabilities = Vec::new();
        let mut equity = Vec::new();

        for row in tb {
            let Some(classification) = registry.classification(&row.account) else {
                continue;
            };
            match classification {
                Classification::BsAsset | Classification::BsDeferred => {
                    assets.push(BalanceSheetLine {
                        balance: rounding.round(row.balance),
                        account: row.account,
                    });
                }
                Classification::BsLiability => {
                    liabilities.push(BalanceSheetLine {
                        balance: rounding.round(row.balance),
                        account: row.account,
                    });
                }
                Classification::BsEquity => {
                    let balance = if row.account == retained_earnings {
                        row.balance + cumulative_net_income
                    } else {
                        row.balance
                    };
                    equity.push(BalanceSheetLine {
                        balance: rounding.round(balance),
                        account: row.account,
                    });
                }
                Classification::IsRevenue | Classification::IsExpense => {}
            }
        }

        if !cumulative_net_income.is_zero() && !equity.iter().any(|l| l.account == retained_earnings) {
            equity.push(BalanceSheetLine {
                account: retained_earnings.to_string(),
                balance: rounding.round(cumulative_net_income),
            });
        }

        let total_assets = rounding.sum(assets.iter().map(|l| l.balance));
        let total_liabilities = rounding.sum(liabilities.iter().map(|l| l.balance));
        let total_equity = rounding.sum(equity.iter().map(|l| l.balance));
        let balanced = within_tolerance(total_assets, total_liabilities + total_equity);

        if !balanced {
            warn!(
                %period,
                %total_assets,
                %total_liabilities,
                %total_equity,
                "Balance sheet does not balance"
            );
        }

        PeriodBalanceSheet {
            period,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            balanced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelbooks_shared::types::EventId;
    use rust_decimal_macros::dec;

    fn posted(period: Period, account: &str, debit: Decimal, credit: Decimal) -> PostedEntry {
        PostedEntry {
            period,
            event_id: EventId::new("e"),
            account: account.to_string(),
            debit,
            credit,
            classification: Classification::BsAsset,
            cash_flow_bucket: None,
            memo: String::new(),
        }
    }

    fn jun() -> Period {
        Period::new(2026, 6).unwrap()
    }

    fn jul() -> Period {
        Period::new(2026, 7).unwrap()
    }

    fn funding_and_acquisition() -> Vec<PostedEntry> {
        vec![
            posted(jun(), "CASH", dec!(1000000), dec!(0)),
            posted(jun(), "EQUITY_CONTRIBUTED", dec!(0), dec!(1000000)),
            posted(jul(), "PROPERTY", dec!(1500000), dec!(0)),
            posted(jul(), "DEBT_ACQUISITION", dec!(0), dec!(1000000)),
            posted(jul(), "EQUITY_CONTRIBUTED", dec!(0), dec!(500000)),
        ]
    }

    #[test]
    fn test_sheet_is_cumulative() {
        let registry = AccountRegistry::standard();
        let entries = funding_and_acquisition();

        let june = BalanceSheetExtractor::extract(&entries, jun(), Decimal::ZERO, &registry, RoundingPolicy::cents());
        assert_eq!(june.total_assets, dec!(1000000));
        assert_eq!(june.total_liabilities, Decimal::ZERO);
        assert_eq!(june.total_equity, dec!(1000000));
        assert!(june.balanced);

        let july = BalanceSheetExtractor::extract(&entries, jul(), Decimal::ZERO, &registry, RoundingPolicy::cents());
        assert_eq!(july.total_assets, dec!(2500000));
        assert_eq!(july.total_liabilities, dec!(1000000));
        assert_eq!(july.total_equity, dec!(1500000));
        assert_eq!(july.liabilities_and_equity(), dec!(2500000));
        assert!(july.balanced);
    }

    #[test]
    fn test_deferred_costs_are_assets() {
        let entries = vec![
            posted(jul(), "CLOSING_COSTS", dec!(20000), dec!(0)),
            posted(jul(), "EQUITY_CONTRIBUTED", dec!(0), dec!(20000)),
        ];
        let bs = BalanceSheetExtractor::extract(
            &entries,
            jul(),
            Decimal::ZERO,
            &AccountRegistry::standard(),
            RoundingPolicy::cents(),
        );
        assert_eq!(bs.assets.len(), 1);
        assert_eq!(bs.assets[0].account, "CLOSING_COSTS");
        assert_eq!(bs.total_assets, dec!(20000));
    }

    #[test]
    fn test_retained_earnings_synthesized_from_net_income() {
        let entries = vec![
            posted(jun(), "CASH", dec!(1000000), dec!(0)),
            posted(jun(), "EQUITY_CONTRIBUTED", dec!(0), dec!(1000000)),
            posted(jun(), "INTEREST_EXPENSE", dec!(7500), dec!(0)),
            posted(jun(), "CASH", dec!(0), dec!(7500)),
        ];
        let bs = BalanceSheetExtractor::extract(
            &entries,
            jun(),
            dec!(-7500),
            &AccountRegistry::standard(),
            RoundingPolicy::cents(),
        );
        assert_eq!(bs.equity_line("RETAINED_EARNINGS").unwrap().balance, dec!(-7500));
        assert_eq!(bs.total_assets, dec!(992500));
        assert_eq!(bs.total_equity, dec!(992500));
        assert!(bs.balanced);
        assert!(bs.assets.iter().all(|l| l.account != "INTEREST_EXPENSE"));
    }

    #[test]
    fn test_posted_retained_earnings_absorbs_net_income() {
        let entries = vec![
            posted(jun(), "CASH", dec!(100), dec!(0)),
            posted(jun(), "RETAINED_EARNINGS", dec!(0), dec!(100)),
        ];
        let bs = BalanceSheetExtractor::extract(
            &entries,
            jun(),
            dec!(25),
            &AccountRegistry::standard(),
            RoundingPolicy::cents(),
        );
        assert_eq!(bs.equity.len(), 1);
        assert_eq!(bs.equity[0].balance, dec!(125));
    }

    #[test]
    fn test_no_retained_earnings_line_without_income() {
        let bs = BalanceSheetExtractor::extract(
            &funding_and_acquisition(),
            jun(),
            Decimal::ZERO,
            &AccountRegistry::standard(),
            RoundingPolicy::cents(),
        );
        assert!(bs.equity_line("RETAINED_EARNINGS").is_none());
    }

    #[test]
    fn test_imbalance_is_flagged_not_corrected() {
        let entries = vec![posted(jun(), "CASH", dec!(500), dec!(0))];
        let bs = BalanceSheetExtractor::extract(
            &entries,
            jun(),
            Decimal::ZERO,
            &AccountRegistry::standard(),
            RoundingPolicy::cents(),
        );
        assert_eq!(bs.total_assets, dec!(500));
        assert!(!bs.balanced);
    }

    #[test]
    fn test_unknown_accounts_left_off() {
        let entries = vec![
            posted(jun(), "CASH", dec!(10), dec!(0)),
            posted(jun(), "SUSPENSE", dec!(0), dec!(10)),
        ];
        let bs = BalanceSheetExtractor::extract(
            &entries,
            jun(),
            Decimal::ZERO,
            &AccountRegistry::standard(),
            RoundingPolicy::cents(),
        );
        assert!(bs.liabilities.is_empty());
        assert!(bs.equity.is_empty());
        assert!(!bs.balanced);
    }
}
