//! Financial statement generation.
//!
//! This module derives statements from posted entries:
//! - Income Statement (period-isolated)
//! - Balance Sheet (cumulative, with retained earnings roll-forward)
//! - Cash Flow Statement (period-isolated, from the cash account)
//! - Reconciliation across the three
//! - The event applier that runs the whole pipeline, per batch or per entity

pub mod applier;
pub mod balance_sheet;
pub mod cash_flow;
pub mod entity;
pub mod income;
pub mod reconcile;
pub mod types;


pub use applier::EventApplier;
pub use balance_sheet::BalanceSheetExtractor;
pub use cash_flow::CashFlowExtractor;
pub use entity::{apply_by_entity, partition_by_entity};
pub use income::IncomeStatementExtractor;
pub use reconcile::Reconciler;
pub use types::*;
