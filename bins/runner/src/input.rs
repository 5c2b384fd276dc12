//! Reading events and charts of accounts from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use hotelbooks_core::ledger::{AccountRegistry, StatementEvent};
use hotelbooks_shared::config::InputConfig;
use hotelbooks_shared::{AppError, AppResult};
use tracing::warn;

fn read(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
        _ => AppError::Io(err),
    })
}

/// Reads a JSON array of statement events.
pub fn load_events(path: &Path) -> AppResult<Vec<StatementEvent>> {
    let raw = read(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Reads a chart of accounts, or returns the standard chart when no path is
/// given, then applies the configured cash and retained earnings accounts.
pub fn load_registry(chart_path: Option<&Path>, input: &InputConfig) -> AppResult<AccountRegistry> {
    let mut registry = match chart_path {
        Some(path) => {
            let raw = read(path)?;
            AccountRegistry::from_json(&raw).map_err(|err| AppError::Validation(err.to_string()))?
        }
        None => AccountRegistry::standard(),
    };

    if let Some(code) = &input.cash_account {
        registry = registry.with_cash_account(code.as_str());
    }
    if let Some(code) = &input.retained_earnings_account {
        registry = registry.with_retained_earnings_account(code.as_str());
    }
    for code in [registry.cash_account(), registry.retained_earnings_account()] {
        if !registry.contains(code) {
            warn!(account = code, "Configured account is not in the chart");
        }
    }
    Ok(registry)
}
